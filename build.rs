use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[path = "build_support/stamp.rs"]
mod stamp;

const BUNDLES: &[(&str, &str)] = &[
    ("public", "static_public"),
    ("admin", "static_admin"),
    ("common", "static_common"),
];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    for (source_name, dest_name) in BUNDLES {
        let source = Path::new("static").join(source_name);
        let dest = out_dir.join(dest_name);
        prepare_bundle(&source, &dest, dest_name)
            .unwrap_or_else(|err| panic!("failed to prepare {dest_name}: {err}"));
    }

    let static_dir = Path::new("static");
    println!("cargo:rerun-if-changed={}", static_dir.display());
    if static_dir.is_dir() {
        for entry in WalkDir::new(static_dir).into_iter().flatten() {
            println!("cargo:rerun-if-changed={}", entry.path().display());
        }
    }
}

fn prepare_bundle(source: &Path, dest: &Path, label: &str) -> Result<(), String> {
    let stamp_path = dest.with_extension("stamp");
    let digest = stamp::bundle_digest(source, label)?;

    if stamp::copy_is_current(&stamp_path, dest, &digest) {
        return Ok(());
    }

    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|err| format!("failed to clean {}: {err}", dest.display()))?;
    }

    copy_dir(source, dest)?;
    stamp::record_digest(&stamp_path, &digest)
}

fn copy_dir(source: &Path, destination: &Path) -> Result<(), String> {
    fs::create_dir_all(destination)
        .map_err(|err| format!("failed to create {}: {err}", destination.display()))?;

    if !source.is_dir() {
        return Ok(());
    }

    for entry in WalkDir::new(source).into_iter().flatten() {
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| format!("failed to strip prefix: {err}"))?;
        let target_path = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .map_err(|err| format!("failed to create {}: {err}", target_path.display()))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
            }
            fs::copy(entry.path(), &target_path)
                .map_err(|err| format!("failed to copy {}: {err}", target_path.display()))?;
        }
    }

    Ok(())
}
