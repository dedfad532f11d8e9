//! Key mapping for twinpane
//!
//! Parses the key strings of the `[keys]` config table and maps key events to
//! actions. There is one table per input mode: normal, console-focused and rename.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, console or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    Console(ConsoleAction),
    System(SystemAction),
}

/// Cursor, directory and panel-focus movement
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoParent,
    GoIntoDir,
    GoUp,
    GoDown,
    FocusLeft,
    FocusRight,
    SwitchPanel,
}

/// Selection, clipboard and filesystem actions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    ToggleSelection,
    Copy,
    Move,
    Paste,
    Delete,
    Rename,
    ClearClipboard,
    ToggleHidden,
}

/// Console panel actions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConsoleAction {
    Grow,
    Shrink,
    CycleMode,
    ToggleFocus,
    Submit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

/// The two keys that end the rename modal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenameAction {
    Confirm,
    Cancel,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    /// A plain character: typing it into a text field must insert it.
    fn is_printable(&self) -> bool {
        matches!(self.code, KeyCode::Char(_))
            && (self.modifiers - KeyModifiers::SHIFT).is_empty()
    }
}

/// Stores the mapping from Key to action for each input mode, built from the config
#[derive(Debug, Clone)]
pub struct Keymap {
    normal: HashMap<Key, Action>,
    console: HashMap<Key, Action>,
    rename: HashMap<Key, RenameAction>,
}

impl Keymap {
    /// Builds the keymaps from the config
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut normal = HashMap::new();
        let mut console = HashMap::new();
        let mut rename = HashMap::new();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut normal);
            };
        }

        // Global actions stay active while the console has focus
        macro_rules! bind_global {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut normal);
                bind_global($keys, $action, &mut console);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use ConsoleAction as C;
        use SystemAction as S;

        // NavActions
        bind!(keys.go_parent(),                 Action::Nav(N::GoParent));
        bind!(keys.go_into(),                   Action::Nav(N::GoIntoDir));
        bind!(keys.go_up(),                     Action::Nav(N::GoUp));
        bind!(keys.go_down(),                   Action::Nav(N::GoDown));
        bind!(keys.focus_left(),                Action::Nav(N::FocusLeft));
        bind!(keys.focus_right(),               Action::Nav(N::FocusRight));
        bind!(keys.switch_panel(),              Action::Nav(N::SwitchPanel));

        // FileActions
        bind!(keys.toggle_selection(),          Action::File(F::ToggleSelection));
        bind!(keys.copy(),                      Action::File(F::Copy));
        bind!(keys.move_to_clipboard(),         Action::File(F::Move));
        bind!(keys.paste(),                     Action::File(F::Paste));
        bind!(keys.delete(),                    Action::File(F::Delete));
        bind!(keys.rename(),                    Action::File(F::Rename));
        bind!(keys.clear_clipboard(),           Action::File(F::ClearClipboard));
        bind!(keys.toggle_hidden(),             Action::File(F::ToggleHidden));

        // ConsoleActions
        bind_global!(keys.grow_console(),       Action::Console(C::Grow));
        bind_global!(keys.shrink_console(),     Action::Console(C::Shrink));
        bind_global!(keys.cycle_console(),      Action::Console(C::CycleMode));
        bind_global!(keys.toggle_console_focus(), Action::Console(C::ToggleFocus));
        bind(keys.submit_command(),             Action::Console(C::Submit), &mut console);

        // SystemActions
        bind_global!(keys.quit(),               Action::System(S::Quit));

        // Rename modal
        bind(keys.confirm_rename(),             RenameAction::Confirm, &mut rename);
        bind(keys.cancel_rename(),              RenameAction::Cancel,  &mut rename);

        Keymap { normal, console, rename }
    }

    /// Looks up the action for a key event in normal mode
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        lookup(&self.normal, key)
    }

    /// Looks up the action for a key event while the console has focus
    pub fn lookup_console(&self, key: KeyEvent) -> Option<Action> {
        lookup(&self.console, key)
    }

    /// Looks up a rename-terminating key
    pub fn lookup_rename(&self, key: KeyEvent) -> Option<RenameAction> {
        lookup(&self.rename, key)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_keys(&Keys::default())
    }
}

fn lookup<A: Copy>(map: &HashMap<Key, A>, key: KeyEvent) -> Option<A> {
    let k = Key {
        code: key.code,
        modifiers: key.modifiers,
    };

    if let Some(action) = map.get(&k).copied() {
        return Some(action);
    }

    if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
        let k2 = Key {
            code: key.code,
            modifiers: key.modifiers - KeyModifiers::SHIFT,
        };
        return map.get(&k2).copied();
    }
    None
}

/// Parses a key string such as `Ctrl+Up`, `<c-x>`, `space` or `D`.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is the key itself, not a separator
    if input == "+" || input == "-" {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind<A: Copy>(key_list: &[String], action: A, map: &mut HashMap<Key, A>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, "ignoring unparsable key binding"),
        }
    }
}

fn bind_global(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        if let Some(key) = parse_key(k)
            && !key.is_printable()
        {
            map.insert(key, action);
        }
    }
}
