//! Recursive copy used by both the synchronous (inline paste) and the background copy path,
//! plus the move and remove primitives of the file actions.
//!
//! Directories are recreated with the source permission bits, files are stream copied
//! through buffered readers/writers and then get the source permission bits applied.
//! The first failing step aborts the whole copy and is reported with its path.

use crate::core::error::{IoContext, OpError};

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffer size used for streaming file contents.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Recursively copies `src` to `dest`.
///
/// An empty source directory is a valid terminal case: `dest` is created and the
/// copy succeeds without copying any children.
pub fn copy_recursive(src: &Path, dest: &Path) -> Result<(), OpError> {
    let meta = fs::symlink_metadata(src).with_path("stat", src)?;

    if meta.is_dir() {
        fs::create_dir_all(dest).with_path("mkdir", dest)?;
        for entry in fs::read_dir(src).with_path("readdir", src)? {
            let entry = entry.with_path("readdir", src)?;
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
        // applied last so a read-only source dir does not block writing its children
        set_mode(dest, &meta)?;
        return Ok(());
    }

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_path("mkdir parent", parent)?;
    }

    let input = File::open(src).with_path("open", src)?;
    let output = File::create(dest).with_path("create", dest)?;

    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, input);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, output);
    io::copy(&mut reader, &mut writer).with_path("copy", dest)?;
    writer.flush().with_path("copy", dest)?;

    set_mode(dest, &meta)
}

/// Moves `src` to `dest` with a rename, falling back to copy and remove when the two
/// paths are on different filesystems.
pub fn move_path(src: &Path, dest: &Path) -> Result<(), OpError> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(src = %src.display(), dest = %dest.display(), "cross-device move, copying");
            copy_recursive(src, dest)?;
            remove_path(src)
        }
        Err(e) => Err(OpError::io("rename", src, e)),
    }
}

/// Removes a file, a symlink or a whole directory tree.
pub fn remove_path(path: &Path) -> Result<(), OpError> {
    let meta = fs::symlink_metadata(path).with_path("stat", path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path).with_path("remove", path)
    } else {
        fs::remove_file(path).with_path("remove", path)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, meta: &fs::Metadata) -> Result<(), OpError> {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode() & 0o777;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).with_path("chmod", path)
}

#[cfg(not(unix))]
fn set_mode(path: &Path, meta: &fs::Metadata) -> Result<(), OpError> {
    fs::set_permissions(path, meta.permissions()).with_path("chmod", path)
}
