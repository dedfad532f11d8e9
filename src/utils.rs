//! Miscellaneous utility functions for twinpane.
//!
//! - [helpers]: home directory, collision-free paths, path display
//! - [cli]: command-line flags of the `tp` binary

pub mod cli;
pub mod helpers;

pub use helpers::{
    get_home, get_unused_path, normalize_path, resolve_cd_target, resolve_initial_dir,
    shorten_home_path,
};
