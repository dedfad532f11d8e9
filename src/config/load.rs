//! The main config loading module for twinpane.
//!
//! Handles loading and deserializing settings from `twinpane.toml`.
//!
//! Provides the main [Config] struct, as well as the [RawConfig] used for parsing.
//! Also writes a default config file for `tp --init`.

use crate::config::{ConsoleSettings, General, Keys};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::PathBuf};

/// Raw configuration as read from the toml file.
/// It is converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    console: ConsoleSettings,
    keys: Keys,
}

/// Main configuration struct for twinpane
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: General,
    console: ConsoleSettings,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            console: raw.console,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            eprintln!(
                "No twinpane.toml config file found. Using internal defaults. (Tip: run 'tp --init' to generate one.)"
            );
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                tracing::warn!(path = %path.display(), error = %e, "config parse failed, using defaults");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Parses a config from toml text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn console(&self) -> &ConsoleSettings {
        &self.console
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the TWINPANE_CONFIG environment variable first,
    /// XDG_CONFIG_HOME after, then defaults to ~/.config/twinpane/twinpane.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TWINPANE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("twinpane/twinpane.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/twinpane/twinpane.toml");
        }
        PathBuf::from("twinpane.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &PathBuf) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

const DEFAULT_TOML: &str = r##"# twinpane.toml - default configuration for twinpane
# Commented values are the internal defaults.

[general]
# show_hidden = false
# dirs_first = false

[console]
# compact_height = 6
# tick_ms = 15
# command_timeout_secs = 30
# max_output_bytes = 20000
# worker_threads = 2
# allowed_commands = ["ls", "pwd", "cat", "echo", "head", "tail", "stat", "date"]
# welcome = ["Welcome to the twinpane console.", "Alt+Up/Down focuses it, Enter runs a command."]

# [keys]
# quit = ["q", "Ctrl+c"]
# toggle_selection = ["space"]
# copy = ["c"]
# move_to_clipboard = ["m"]
# paste = ["p"]
# delete = ["D"]
# rename = ["r"]
# clear_clipboard = ["x"]
# toggle_hidden = ["."]
# focus_left = ["Alt+Left"]
# focus_right = ["Alt+Right"]
# switch_panel = ["Tab"]
# go_parent = ["Left", "h", "Backspace"]
# go_into = ["Right", "l", "Enter"]
# go_up = ["Up", "k"]
# go_down = ["Down", "j"]
# grow_console = ["Ctrl+Up"]
# shrink_console = ["Ctrl+Down"]
# cycle_console = ["Ctrl+t"]
# toggle_console_focus = ["Alt+Up", "Alt+Down"]
# submit_command = ["Enter"]
# confirm_rename = ["Enter"]
# cancel_rename = ["Esc"]
"##;
