//! The general configuration settings for twinpane.
//!
//! Defines the [General] struct deserialized from the `[general]` table of
//! twinpane.toml.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    dirs_first: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            dirs_first: false,
        }
    }
}

impl General {
    /// Initial hidden-file toggle of both panels.
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn dirs_first(&self) -> bool {
        self.dirs_first
    }
}
