//! Input configuration options for twinpane
//!
//! This module defines the key binding options which are read from the twinpane.toml
//! configuration file.

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    quit: Vec<String>,
    toggle_selection: Vec<String>,
    copy: Vec<String>,
    move_to_clipboard: Vec<String>,
    paste: Vec<String>,
    delete: Vec<String>,
    rename: Vec<String>,
    clear_clipboard: Vec<String>,
    toggle_hidden: Vec<String>,
    focus_left: Vec<String>,
    focus_right: Vec<String>,
    switch_panel: Vec<String>,
    go_parent: Vec<String>,
    go_into: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    grow_console: Vec<String>,
    shrink_console: Vec<String>,
    cycle_console: Vec<String>,
    toggle_console_focus: Vec<String>,
    submit_command: Vec<String>,
    confirm_rename: Vec<String>,
    cancel_rename: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    quit,
    toggle_selection,
    copy,
    move_to_clipboard,
    paste,
    delete,
    rename,
    clear_clipboard,
    toggle_hidden,
    focus_left,
    focus_right,
    switch_panel,
    go_parent,
    go_into,
    go_up,
    go_down,
    grow_console,
    shrink_console,
    cycle_console,
    toggle_console_focus,
    submit_command,
    confirm_rename,
    cancel_rename,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            quit: vec!["q".into(), "Ctrl+c".into()],

            toggle_selection: vec!["space".into()],
            copy: vec!["c".into()],
            move_to_clipboard: vec!["m".into()],
            paste: vec!["p".into()],
            delete: vec!["D".into()],
            rename: vec!["r".into()],
            clear_clipboard: vec!["x".into()],
            toggle_hidden: vec![".".into()],

            focus_left: vec!["Alt+Left".into()],
            focus_right: vec!["Alt+Right".into()],
            switch_panel: vec!["Tab".into()],

            go_parent: vec!["Left".into(), "h".into(), "Backspace".into()],
            go_into: vec!["Right".into(), "l".into(), "Enter".into()],
            go_up: vec!["Up".into(), "k".into()],
            go_down: vec!["Down".into(), "j".into()],

            grow_console: vec!["Ctrl+Up".into()],
            shrink_console: vec!["Ctrl+Down".into()],
            cycle_console: vec!["Ctrl+t".into()],
            toggle_console_focus: vec!["Alt+Up".into(), "Alt+Down".into()],
            submit_command: vec!["Enter".into()],

            confirm_rename: vec!["Enter".into()],
            cancel_rename: vec!["Esc".into()],
        }
    }
}
