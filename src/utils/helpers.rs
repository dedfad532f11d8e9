//! Utility helpers for twinpane.
//!
//! Home directory lookup, collision-free destination names and display helpers.

use std::collections::HashSet;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// The user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Whether anything (including a dangling symlink) occupies `path`, or it is reserved.
fn is_taken(path: &Path, reserved: &HashSet<PathBuf>) -> bool {
    reserved.contains(path) || path.symlink_metadata().is_ok()
}

/// Returns `path` if it is free, otherwise the first free sibling named
/// `<stem>_<n><ext>` with `n = 1, 2, ...`.
///
/// Paths in `reserved` count as taken even though nothing exists there yet.
/// Dotfiles keep their whole name as the stem (`.config` becomes `.config_1`).
pub fn get_unused_path(path: &Path, reserved: &HashSet<PathBuf>) -> PathBuf {
    if !is_taken(path, reserved) {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let name = path.file_name().unwrap_or_default();
    let as_path = Path::new(name);

    let stem = as_path.file_stem().unwrap_or(name).to_string_lossy();
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| parent.join(format!("{stem}_{n}{ext}")))
        .find(|candidate| !is_taken(candidate, reserved))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Shortens `home` to `~` at the start of `path`, for titles.
pub fn shorten_home_path(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(stripped) = path.strip_prefix(home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Removes `.` and `..` components without touching the filesystem.
///
/// `..` above the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Resolves a `cd` argument against `base`. `~` and `~/...` use `home`.
pub fn resolve_cd_target(arg: Option<&str>, base: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let target = match arg {
        None | Some("~") => home?.to_path_buf(),
        Some(rest) if rest.starts_with("~/") => home?.join(&rest[2..]),
        Some(p) => base.join(p),
    };
    Some(normalize_path(&target))
}

/// Resolves the directory given on the command line.
///
/// `~` and `~/...` are expanded, relative paths are taken from the working directory.
/// Returns `None` unless the result is an existing directory.
pub fn resolve_initial_dir(arg: &str) -> Option<PathBuf> {
    let expanded = match arg.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(MAIN_SEPARATOR) => {
            get_home()?.join(rest.trim_start_matches(MAIN_SEPARATOR))
        }
        _ => PathBuf::from(arg),
    };
    let resolved = expanded.canonicalize().ok()?;
    resolved.is_dir().then_some(resolved)
}
