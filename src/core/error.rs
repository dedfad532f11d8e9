//! Error taxonomy for twinpane file and command operations.
//!
//! Every failure is caught where it happens and turned into a console line by the
//! dispatcher, so [OpError] only needs a good `Display`. Nothing here is fatal.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    /// A filesystem primitive failed. Always names the operation and the offending path.
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("command not allowed: {0}")]
    CommandRejected(String),

    #[error("command timed out")]
    CommandTimeout,

    #[error("empty command")]
    EmptyInput,

    #[error("cd is a builtin and handled by the application")]
    BuiltinCd,

    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    ExitStatus(ExitStatus),
}

impl OpError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        OpError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Attaches an operation name and a path to an `io::Result`.
pub trait IoContext<T> {
    fn with_path(self, op: &'static str, path: impl Into<PathBuf>) -> Result<T, OpError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn with_path(self, op: &'static str, path: impl Into<PathBuf>) -> Result<T, OpError> {
        self.map_err(|source| OpError::io(op, path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_operation_and_path() {
        let err = OpError::io(
            "mkdir",
            "/nowhere/dir",
            io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("mkdir /nowhere/dir"), "got {msg}");
        assert!(msg.contains("Permission denied"));
    }

    #[test]
    fn policy_outcomes_display() {
        assert_eq!(
            OpError::CommandRejected("rm".into()).to_string(),
            "command not allowed: rm"
        );
        assert_eq!(OpError::CommandTimeout.to_string(), "command timed out");
        assert_eq!(OpError::EmptyInput.to_string(), "empty command");
    }
}
