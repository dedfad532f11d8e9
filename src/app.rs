//! Application state and input handling for twinpane.
//!
//! - [state]: [AppState], the single owner of mutable state, and its `dispatch` entry point.
//! - [handlers]: per-mode key handling, file and console actions, job results.
//! - [panel], [clipboard], [console]: the data the dispatcher mutates.
//! - [animator]: console height animation and its tick scheduler.
//! - [input], [rename]: the line editor and the rename modal built on it.
//! - [keymap]: key parsing and the per-mode binding tables.

pub mod animator;
pub mod clipboard;
pub mod console;
mod handlers;
pub mod input;
pub mod keymap;
pub mod panel;
pub mod rename;
pub mod state;

pub use animator::{Animator, ConsoleMode, Ticker};
pub use clipboard::{Clipboard, Operation};
pub use console::ConsoleLog;
pub use input::{LineEditor, TextInput};
pub use keymap::{Action, Keymap};
pub use panel::{PanelId, PanelState};
pub use rename::{RenameState, RenameStep};
pub use state::{AppEvent, AppState, Effects, LayoutMetrics};
