//! Configuration module for twinpane.
//!
//! Loads `twinpane.toml` into a [Config]:
//! - [general]: hidden-file default and listing order.
//! - [console]: animation cadence, compact height and the command policy.
//! - [input]: key bindings for every action.
//! - [load]: file discovery, parsing and `--init` generation.

pub mod console;
pub mod general;
pub mod input;
pub mod load;

pub use console::ConsoleSettings;
pub use general::General;
pub use input::Keys;
pub use load::{Config, RawConfig};
