use std::fs;
use std::path::Path;

use tempfile::tempdir;

#[path = "../build_support/stamp.rs"]
mod stamp;

fn write_bundle(root: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("bundle dirs should be created");
        }
        fs::write(path, contents).expect("bundle file should be written");
    }
}

#[test]
fn digest_follows_contents_not_location() {
    let temp = tempdir().expect("temp dir should be created");
    let first = temp.path().join("checkout-a/static/admin");
    let second = temp.path().join("checkout-b/static/admin");
    let files = [("admin.css", "body {}"), ("js/admin.js", "(() => {})();")];
    write_bundle(&first, &files);
    write_bundle(&second, &files);

    // Identical bundles in different checkouts digest identically.
    let a = stamp::bundle_digest(&first, "static_admin").expect("digest");
    let b = stamp::bundle_digest(&second, "static_admin").expect("digest");
    assert_eq!(a, b);

    fs::write(second.join("admin.css"), "body { margin: 0 }").expect("edit");
    let edited = stamp::bundle_digest(&second, "static_admin").expect("digest");
    assert_ne!(a, edited);

    let relabeled = stamp::bundle_digest(&first, "static_public").expect("digest");
    assert_ne!(a, relabeled);
}

#[test]
fn a_bundle_that_appears_later_invalidates_the_stamp() {
    let temp = tempdir().expect("temp dir should be created");
    let bundle = temp.path().join("static/common");

    let while_missing = stamp::bundle_digest(&bundle, "static_common").expect("digest");
    write_bundle(&bundle, &[("brand/logo.svg", "<svg/>")]);
    let once_present = stamp::bundle_digest(&bundle, "static_common").expect("digest");

    assert_ne!(while_missing, once_present);
}

#[test]
fn recorded_digest_gates_the_copy() {
    let temp = tempdir().expect("temp dir should be created");
    let copy = temp.path().join("static_public");
    let stamp_path = temp.path().join("static_public.stamp");
    fs::create_dir_all(&copy).expect("copy dir should be created");

    let digest = "0123456789abcdef";
    assert!(!stamp::copy_is_current(&stamp_path, &copy, digest));

    stamp::record_digest(&stamp_path, digest).expect("stamp should be written");
    assert!(stamp::copy_is_current(&stamp_path, &copy, digest));
    assert!(!stamp::copy_is_current(&stamp_path, &copy, "fedcba9876543210"));

    // Losing the copy forces a redo even with a matching stamp on disk.
    fs::remove_dir_all(&copy).expect("copy dir should be removed");
    assert!(!stamp::copy_is_current(&stamp_path, &copy, digest));
}
