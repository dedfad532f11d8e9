//! Logging setup for twinpane.
//!
//! The terminal belongs to the TUI, so log records go to a file:
//! `<cache dir>/twinpane/twinpane.log`. The filter comes from `TWINPANE_LOG`
//! and defaults to `info`.
//!
//! Call [init] at the start of main() and keep the returned guard alive until exit.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "TWINPANE_LOG";
const DEFAULT_FILTER: &str = "info";

/// Where the log file lives, if a cache directory is known.
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("twinpane").join("twinpane.log"))
}

/// Installs the file logger.
///
/// Returns `None` when the log file cannot be opened; the app then runs without logging.
/// Nothing is printed in that case.
pub fn init() -> Option<WorkerGuard> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "twinpane starting");
    Some(guard)
}
