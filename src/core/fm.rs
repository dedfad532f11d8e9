//! Directory listing for twinpane.
//!
//! Provides the [FileEntry] struct used by both panels and the [browse_dir] /
//! [list_entries] functions which produce a panel's ordered entry list.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// A single entry in a panel listing.
///
/// Holds the name and a few attribute flags. A listing failure is represented by a
/// sentinel entry with the `IS_ERROR` flag set; it is displayed but never acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: Box<OsStr>,
    flags: u8,
}

impl FileEntry {
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_HIDDEN: u8 = 1 << 1;
    pub(crate) const IS_SYMLINK: u8 = 1 << 2;
    pub(crate) const IS_ERROR: u8 = 1 << 3;

    pub fn new(name: OsString, flags: u8) -> Self {
        FileEntry {
            name: name.into_boxed_os_str(),
            flags,
        }
    }

    /// Sentinel entry standing in for a directory that could not be listed.
    pub fn error(err: &io::Error) -> Self {
        Self::new(OsString::from(format!("Error: {}", err)), Self::IS_ERROR)
    }

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.flags & Self::IS_ERROR != 0
    }
}

/// Reads the contents of the directory into name-ordered [FileEntry] values.
///
/// Hidden entries (leading dot) are dropped unless `show_hidden` is set.
pub fn browse_dir(path: &Path, show_hidden: bool, dirs_first: bool) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(64);

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else {
            continue;
        };
        let name = entry.file_name();
        let mut flags = 0u8;

        if name.to_string_lossy().starts_with('.') {
            if !show_hidden {
                continue;
            }
            flags |= FileEntry::IS_HIDDEN;
        }

        if let Ok(ft) = entry.file_type() {
            if ft.is_symlink() {
                flags |= FileEntry::IS_SYMLINK;
                // follow the link so directories behind symlinks can be entered
                if fs::metadata(entry.path()).is_ok_and(|md| md.is_dir()) {
                    flags |= FileEntry::IS_DIR;
                }
            } else if ft.is_dir() {
                flags |= FileEntry::IS_DIR;
            }
        }

        entries.push(FileEntry::new(name, flags));
    }

    entries.sort_by(|a, b| {
        if dirs_first && a.is_dir() != b.is_dir() {
            return if a.is_dir() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        a.name().cmp(b.name())
    });

    Ok(entries)
}

/// Lists a directory for a panel, folding a failure into a single sentinel entry.
pub fn list_entries(path: &Path, show_hidden: bool, dirs_first: bool) -> Vec<FileEntry> {
    match browse_dir(path, show_hidden, dirs_first) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "directory listing failed");
            vec![FileEntry::error(&e)]
        }
    }
}
