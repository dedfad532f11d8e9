//! Core runtime logic for twinpane.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing (see [browse_dir], [list_entries], [FileEntry]).
//! - [copy]: recursive copy with permission bits, move and remove.
//! - [proc]: allow-listed command execution with timeout and output cap.
//! - [worker]: background job pools and the [Job] / [JobResult] protocol.
//! - [error]: the [OpError] taxonomy every operation reports through.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod copy;
pub mod error;
pub mod fm;
pub mod proc;
pub mod terminal;
pub mod worker;

pub use copy::{copy_recursive, move_path, remove_path};
pub use error::OpError;
pub use fm::{FileEntry, browse_dir, list_entries};
pub use proc::{CommandPolicy, run_command, tokenize};
pub use worker::{Job, JobResult, Workers, run_job};
