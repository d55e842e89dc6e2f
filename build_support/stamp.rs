//! Change detection for the embedded static bundles.
//!
//! `build.rs` copies each bundle into OUT_DIR before `include_dir!` embeds
//! it. Re-copying on every build would churn mtimes and retrigger downstream
//! work, so a digest of the bundle is recorded next to the copy and checked
//! on the next run.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use walkdir::WalkDir;

/// Hex digest of every file under `source`, keyed by bundle-relative path so
/// the result does not depend on where the checkout lives. A missing bundle
/// digests to a distinct marker; creating it later invalidates the stamp.
pub fn bundle_digest(source: &Path, label: &str) -> Result<String, String> {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);

    if !source.is_dir() {
        "no-bundle".hash(&mut hasher);
        return Ok(format!("{:016x}", hasher.finish()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source) {
        let entry =
            entry.map_err(|err| format!("failed to walk {}: {err}", source.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    for file in files {
        let relative = file
            .strip_prefix(source)
            .map_err(|err| format!("failed to relativize {}: {err}", file.display()))?;
        relative.to_string_lossy().hash(&mut hasher);
        fs::read(&file)
            .map_err(|err| format!("failed to read {}: {err}", file.display()))?
            .hash(&mut hasher);
    }

    Ok(format!("{:016x}", hasher.finish()))
}

/// True when the copied bundle exists and the stamp records exactly
/// `digest`. An unreadable or absent stamp just means the copy is redone.
pub fn copy_is_current(stamp_path: &Path, copy: &Path, digest: &str) -> bool {
    if !copy.exists() {
        return false;
    }
    match fs::read_to_string(stamp_path) {
        Ok(recorded) => recorded.trim() == digest,
        Err(_) => false,
    }
}

pub fn record_digest(stamp_path: &Path, digest: &str) -> Result<(), String> {
    fs::write(stamp_path, digest)
        .map_err(|err| format!("failed to write stamp {}: {err}", stamp_path.display()))
}
