//! Recursive copy tests against a real directory tree.

use std::error;
use std::fs;
use tempfile::tempdir;
use twinpane::core::{copy_recursive, move_path, remove_path};

#[test]
fn test_copy_tree_keeps_empty_dirs_and_contents() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let src = temp.path().join("project");
    fs::create_dir_all(src.join("src/nested"))?;
    fs::create_dir_all(src.join("empty"))?;
    fs::write(src.join("README.md"), "readme")?;
    fs::write(src.join("src/nested/lib.rs"), "pub fn f() {}")?;

    let dest = temp.path().join("copy");
    copy_recursive(&src, &dest)?;

    assert!(dest.join("empty").is_dir());
    assert_eq!(fs::read_dir(dest.join("empty"))?.count(), 0);
    assert_eq!(fs::read_to_string(dest.join("README.md"))?, "readme");
    assert_eq!(
        fs::read_to_string(dest.join("src/nested/lib.rs"))?,
        "pub fn f() {}"
    );
    // source untouched
    assert!(src.join("src/nested/lib.rs").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_copy_tree_keeps_permission_bits() -> Result<(), Box<dyn error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir()?;
    let src = temp.path().join("bin");
    fs::create_dir(&src)?;
    let script = src.join("run.sh");
    fs::write(&script, "#!/bin/sh\n")?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o750))?;
    fs::set_permissions(&src, fs::Permissions::from_mode(0o751))?;

    let dest = temp.path().join("bin_copy");
    copy_recursive(&src, &dest)?;

    let mode = |p: &std::path::Path| -> Result<u32, Box<dyn error::Error>> {
        Ok(fs::metadata(p)?.permissions().mode() & 0o777)
    };
    assert_eq!(mode(&dest.join("run.sh"))?, 0o750);
    assert_eq!(mode(&dest)?, 0o751);
    Ok(())
}

#[test]
fn test_copy_missing_source_names_path() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("ghost.txt");
    let err = match copy_recursive(&missing, &temp.path().join("out.txt")) {
        Ok(()) => return Err("copy of a missing file succeeded".into()),
        Err(e) => e,
    };
    assert!(err.to_string().contains("ghost.txt"), "got {err}");
    assert!(!temp.path().join("out.txt").exists());
    Ok(())
}

#[test]
fn test_move_and_remove_tree() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let src = temp.path().join("tree");
    fs::create_dir_all(src.join("a/b"))?;
    fs::write(src.join("a/b/c.txt"), "c")?;

    let moved = temp.path().join("moved");
    move_path(&src, &moved)?;
    assert!(!src.exists());
    assert_eq!(fs::read_to_string(moved.join("a/b/c.txt"))?, "c");

    remove_path(&moved)?;
    assert!(!moved.exists());
    Ok(())
}
