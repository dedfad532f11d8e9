//! Console panel configuration for twinpane.
//!
//! The `[console]` table holds the animation cadence, the compact height and the
//! command policy (allow-list, timeout, output ceiling) of the embedded console.

use crate::core::CommandPolicy;

use serde::Deserialize;
use std::time::Duration;

pub const MIN_WORKER_THREADS: usize = 1;
pub const MAX_WORKER_THREADS: usize = 16;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ConsoleSettings {
    compact_height: u16,
    tick_ms: u64,
    command_timeout_secs: u64,
    max_output_bytes: usize,
    allowed_commands: Vec<String>,
    worker_threads: usize,
    welcome: Vec<String>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        ConsoleSettings {
            compact_height: 6,
            tick_ms: 15,
            command_timeout_secs: 30,
            max_output_bytes: 20_000,
            allowed_commands: ["ls", "pwd", "cat", "echo", "head", "tail", "stat", "date"]
                .into_iter()
                .map(String::from)
                .collect(),
            worker_threads: 2,
            welcome: vec![
                "Welcome to the twinpane console.".into(),
                "Alt+Up/Down focuses it, Enter runs a command.".into(),
            ],
        }
    }
}

impl ConsoleSettings {
    #[inline]
    pub fn compact_height(&self) -> u16 {
        self.compact_height
    }

    /// Delay between two animation ticks.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    #[inline]
    pub fn welcome(&self) -> &[String] {
        &self.welcome
    }

    pub fn worker_threads(&self) -> usize {
        let clamped = self
            .worker_threads
            .clamp(MIN_WORKER_THREADS, MAX_WORKER_THREADS);
        if clamped != self.worker_threads {
            tracing::warn!(
                requested = self.worker_threads,
                used = clamped,
                "console.worker_threads out of range"
            );
        }
        clamped
    }

    /// Builds the command policy the job engine enforces.
    pub fn command_policy(&self) -> CommandPolicy {
        CommandPolicy::new(
            self.allowed_commands.iter().cloned(),
            Duration::from_secs(self.command_timeout_secs.max(1)),
            self.max_output_bytes,
        )
    }
}
