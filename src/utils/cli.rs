//! Command-line argument parsing and help for twinpane.
//!
//! Handles the few flags the `tp` binary understands: help, version, key bindings
//! and config initialization.
//!
//! When invoked with no args/flags (tp), twinpane simply launches the TUI in the
//! current directory.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args)
}

/// Decides what to do from the full argument list (program name first).
pub fn parse_args(args: &[String]) -> CliAction {
    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: twinpane accepts only one argument at a time.");
        eprintln!("Usage: tp [PATH] or tp [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" | "--keys" => {
            println!("{}", KEYBINDS_TEXT);
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("twinpane {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"twinpane - A keyboard-driven dual-pane terminal file manager

USAGE:
  tp [PATH]

PATH:
  Directory to open in both panels (defaults to current directory)

OPTIONS:
      --init              Generate a default configuration file
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of twinpane

ENVIRONMENT:
  TWINPANE_CONFIG         Override the default config path
  TWINPANE_LOG            Log filter (e.g. "debug", "twinpane=trace")
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  Panels
    go_up                   ["Up", "k"]
    go_down                 ["Down", "j"]
    go_parent               ["Left", "h", "Backspace"]
    go_into                 ["Right", "l", "Enter"]   (on a file: paste here, or run it)
    switch_panel            ["Tab"]
    focus_left              ["Alt+Left"]
    focus_right             ["Alt+Right"]

  Files
    toggle_selection        ["space"]
    copy                    ["c"]
    move_to_clipboard       ["m"]
    paste                   ["p"]
    delete                  ["D"]
    rename                  ["r"]
    clear_clipboard         ["x"]
    toggle_hidden           ["."]

  Console
    toggle_console_focus    ["Alt+Up", "Alt+Down"]
    grow_console            ["Ctrl+Up"]
    shrink_console          ["Ctrl+Down"]
    cycle_console           ["Ctrl+t"]   (hidden, compact, expanded, top line)
    submit_command          ["Enter"]    (console focused)

  Rename dialog
    confirm_rename          ["Enter"]
    cancel_rename           ["Esc"]

  quit                      ["q", "Ctrl+c"]

  Syntax Reference:
    Modifiers: Ctrl+x, Alt+x, Shift+x
    Special:   "space", "Enter", "Esc", "Tab", "Backspace", "Delete", arrows
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&["tp"])), CliAction::RunApp);
        assert_eq!(
            parse_args(&args(&["tp", "/tmp"])),
            CliAction::RunAppAtPath("/tmp".into())
        );
        assert_eq!(parse_args(&args(&["tp", "--bogus"])), CliAction::Exit);
        assert_eq!(parse_args(&args(&["tp", "a", "b"])), CliAction::Exit);
    }
}
