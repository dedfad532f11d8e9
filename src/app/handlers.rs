//! Input and job-result handler methods for twinpane.
//!
//! This module implements the [AppState] methods behind [AppState::dispatch]: one key
//! handler per input mode, the navigation, file and console actions, and the absorption
//! of background job results.

use crate::app::clipboard::Operation;
use crate::app::input::LineEditor;
use crate::app::keymap::{
    Action, ConsoleAction, FileAction, NavAction, RenameAction, SystemAction,
};
use crate::app::panel::PanelId;
use crate::app::rename::{RenameState, RenameStep};
use crate::app::state::{AppState, Effects};
use crate::core::{Job, JobResult, OpError, copy_recursive, move_path, remove_path};
use crate::utils::{get_unused_path, resolve_cd_target};

use crossterm::event::KeyEvent;

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Where a clipboard entry goes on paste.
enum PastePlan {
    Go(PathBuf),
    /// The entry is already where it would be moved to.
    InPlace,
    /// The destination lies inside the source directory.
    IntoItself,
}

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // Key handlers per input mode

    /// Rename modal: confirm and cancel end it, every other key is edited.
    pub(super) fn handle_rename_key(&mut self, key: KeyEvent) {
        let Some(state) = self.rename.as_mut() else {
            return;
        };
        let step = match self.keymap.lookup_rename(key) {
            Some(RenameAction::Confirm) => state.confirm(),
            Some(RenameAction::Cancel) => state.cancel(),
            None => state.edit(key),
        };

        match step {
            RenameStep::Continue => {}
            RenameStep::Cancel => self.rename = None,
            RenameStep::Confirm(name) => {
                if let Some(state) = self.rename.take() {
                    self.apply_rename(state.target(), state.panel(), &name);
                }
            }
        }
    }

    /// Console focused: global actions and submit, the rest goes to the prompt.
    pub(super) fn handle_console_key(&mut self, key: KeyEvent, fx: &mut Effects) {
        match self.keymap.lookup_console(key) {
            Some(Action::Console(ConsoleAction::Submit)) => self.submit_command(fx),
            Some(action) => self.handle_action(action, fx),
            None => {
                self.console_input.handle_key(key);
            }
        }
    }

    pub(super) fn handle_normal_key(&mut self, key: KeyEvent, fx: &mut Effects) {
        if let Some(action) = self.keymap.lookup(key) {
            self.handle_action(action, fx);
        }
    }

    fn handle_action(&mut self, action: Action, fx: &mut Effects) {
        match action {
            Action::Nav(nav) => self.handle_nav_action(nav),
            Action::File(file) => self.handle_file_action(file, fx),
            Action::Console(console) => self.handle_console_action(console, fx),
            Action::System(SystemAction::Quit) => fx.request_quit(),
        }
    }

    // Actions

    fn handle_nav_action(&mut self, action: NavAction) {
        match action {
            NavAction::GoUp => self.active_panel_mut().move_up(),
            NavAction::GoDown => {
                let rows = self.visible_rows();
                self.active_panel_mut().move_down(rows);
            }
            NavAction::GoParent => {
                if self.active_panel_mut().go_parent() {
                    self.panel_mut(self.active.other()).clear_selection();
                }
            }
            NavAction::GoIntoDir => self.go_into_or_run(),
            NavAction::FocusLeft => self.active = PanelId::Left,
            NavAction::FocusRight => self.active = PanelId::Right,
            NavAction::SwitchPanel => self.active = self.active.other(),
        }
    }

    fn handle_file_action(&mut self, action: FileAction, fx: &mut Effects) {
        match action {
            FileAction::ToggleSelection => self.active_panel_mut().toggle_selection(),
            FileAction::Copy => self.fill_clipboard(Operation::Copy),
            FileAction::Move => self.fill_clipboard(Operation::Move),
            FileAction::Paste => self.paste(fx),
            FileAction::Delete => self.delete_targets(),
            FileAction::Rename => self.start_rename(),
            FileAction::ClearClipboard => {
                self.clipboard.clear();
                self.clear_selections();
                self.console.push("Clipboard cleared.");
            }
            FileAction::ToggleHidden => self.active_panel_mut().toggle_hidden(),
        }
    }

    fn handle_console_action(&mut self, action: ConsoleAction, fx: &mut Effects) {
        match action {
            ConsoleAction::Grow => {
                let limit = self.metrics.height.saturating_sub(3);
                let target = self.animator.target().saturating_add(1).min(limit);
                self.retarget_console(target, fx);
            }
            ConsoleAction::Shrink => {
                let target = self.animator.target().saturating_sub(1);
                self.retarget_console(target, fx);
            }
            ConsoleAction::CycleMode => {
                self.console_mode = self.console_mode.next();
                let target = self
                    .console_mode
                    .target_height(self.metrics.height, self.config.console().compact_height());
                self.retarget_console(target, fx);
            }
            ConsoleAction::ToggleFocus => self.console_focused = !self.console_focused,
            ConsoleAction::Submit => self.submit_command(fx),
        }
    }

    // Navigation

    /// Enters the highlighted directory. On a file, pastes the clipboard into the active
    /// panel's directory, or reports the file when the clipboard is empty.
    fn go_into_or_run(&mut self) {
        if self.active_panel_mut().enter_highlighted() {
            self.panel_mut(self.active.other()).clear_selection();
            return;
        }
        let Some(path) = self.active_panel().highlighted_path() else {
            return;
        };
        if self.clipboard.is_empty() {
            self.console.push(format!("Run: {}", path.display()));
        } else {
            self.inline_paste();
        }
    }

    // Clipboard and file operations

    fn fill_clipboard(&mut self, operation: Operation) {
        let targets = self.active_panel().action_targets();
        if !self.clipboard.fill(targets, operation) {
            self.console.push(match operation {
                Operation::Move => "Nothing to move.",
                _ => "Nothing to copy.",
            });
            return;
        }
        self.clear_selections();
        self.console.push(match operation {
            Operation::Move => "Ready to move.",
            _ => "Copied to clipboard.",
        });
    }

    /// Decides where `source` lands inside `dest_dir`.
    ///
    /// Destinations of copies still in flight count as taken.
    fn plan_paste(&self, source: &Path, dest_dir: &Path, operation: Operation) -> Option<PastePlan> {
        let name = source.file_name()?;
        let dest = dest_dir.join(name);

        if operation == Operation::Move && dest == source {
            return Some(PastePlan::InPlace);
        }
        if dest_dir.starts_with(source) {
            return Some(PastePlan::IntoItself);
        }
        Some(PastePlan::Go(get_unused_path(&dest, &self.in_flight)))
    }

    /// Pastes every clipboard entry into the active panel's directory.
    ///
    /// Copies are launched as background jobs (one per entry) and report when they
    /// finish. Moves are renames and complete right here.
    fn paste(&mut self, fx: &mut Effects) {
        if self.clipboard.is_empty() {
            self.console.push("Clipboard is empty.");
            return;
        }
        let (sources, operation) = self.clipboard.take();
        let dest_dir = self.active_panel().dir().to_path_buf();

        for source in sources {
            match (self.plan_paste(&source, &dest_dir, operation), operation) {
                (Some(PastePlan::Go(dest)), Operation::Copy) => {
                    tracing::info!(src = %source.display(), dest = %dest.display(), "launching copy");
                    self.in_flight.insert(dest.clone());
                    fx.launch(Job::Copy { source, dest });
                }
                (Some(PastePlan::Go(dest)), Operation::Move) => self.move_entry(&source, &dest),
                (plan, _) => self.report_skipped(&source, plan, operation),
            }
        }

        self.clear_selections();
        self.refresh_after_change(&dest_dir);
    }

    /// Inline paste from the Enter key: copies and moves both complete before returning.
    fn inline_paste(&mut self) {
        let (sources, operation) = self.clipboard.take();
        let dest_dir = self.active_panel().dir().to_path_buf();

        for source in sources {
            match (self.plan_paste(&source, &dest_dir, operation), operation) {
                (Some(PastePlan::Go(dest)), Operation::Copy) => match copy_recursive(&source, &dest) {
                    Ok(()) => {
                        self.console.push(format!("Copied to: {}", dest.display()));
                        self.refresh_after_change(&dest);
                    }
                    Err(e) => {
                        tracing::warn!(src = %source.display(), error = %e, "inline copy failed");
                        self.console.push(format!("Error copying: {}", e));
                    }
                },
                (Some(PastePlan::Go(dest)), Operation::Move) => self.move_entry(&source, &dest),
                (plan, _) => self.report_skipped(&source, plan, operation),
            }
        }

        self.clear_selections();
    }

    fn move_entry(&mut self, source: &Path, dest: &Path) {
        match move_path(source, dest) {
            Ok(()) => {
                self.console.push(format!("Moved to: {}", dest.display()));
                self.refresh_after_change(source);
                self.refresh_after_change(dest);
            }
            Err(e) => {
                tracing::warn!(src = %source.display(), error = %e, "move failed");
                self.console.push(format!("Error moving: {}", e));
            }
        }
    }

    fn report_skipped(&mut self, source: &Path, plan: Option<PastePlan>, operation: Operation) {
        let verb = match operation {
            Operation::Move => "moving",
            _ => "copying",
        };
        let line = match plan {
            Some(PastePlan::InPlace) => format!(
                "Skipped moving {}: already in this directory",
                source.display()
            ),
            Some(PastePlan::IntoItself) => format!(
                "Error {}: cannot put {} inside itself",
                verb,
                source.display()
            ),
            _ => format!("Error {}: invalid source {}", verb, source.display()),
        };
        self.console.push(line);
    }

    /// Deletes the selection (or the highlighted entry) of the active panel.
    ///
    /// Each target gets one console line. A failure does not stop the remaining targets.
    fn delete_targets(&mut self) {
        let targets = self.active_panel().action_targets();
        if targets.is_empty() {
            self.console.push("Nothing to delete.");
            return;
        }

        for target in &targets {
            match remove_path(target) {
                Ok(()) => {
                    tracing::info!(path = %target.display(), "deleted");
                    let name = target
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| target.display().to_string());
                    self.console.push(format!("Deleted: {}", name));
                }
                Err(e) => {
                    tracing::warn!(path = %target.display(), error = %e, "delete failed");
                    self.console.push(format!("Error deleting: {}", e));
                }
            }
        }

        for panel in &mut self.panels {
            panel.reload();
        }
    }

    // Rename

    fn start_rename(&mut self) {
        match self.active_panel().highlighted_path() {
            Some(target) => self.rename = Some(RenameState::new(target, self.active)),
            None => self.console.push("Nothing to rename."),
        }
    }

    fn apply_rename(&mut self, target: &Path, panel: PanelId, name: &str) {
        if name.is_empty() {
            self.console.push("Error renaming: empty name");
            return;
        }
        if target.file_name().is_some_and(|n| n == name) {
            self.console.push("Rename skipped: name unchanged");
            return;
        }
        if name.contains('/') || name.contains(MAIN_SEPARATOR) || name == "." || name == ".." {
            self.console.push(format!("Error renaming: invalid name '{}'", name));
            return;
        }

        let parent = target.parent().unwrap_or_else(|| Path::new(""));
        let new_path = parent.join(name);
        if new_path.symlink_metadata().is_ok() {
            self.console.push(format!("Error renaming: '{}' already exists", name));
            return;
        }

        match std::fs::rename(target, &new_path) {
            Ok(()) => {
                tracing::info!(from = %target.display(), to = %new_path.display(), "renamed");
                self.console.push(format!("Renamed to: {}", name));
                self.panel_mut(panel).reload();
                self.refresh_after_change(&new_path);
                self.clear_selections();
            }
            Err(e) => {
                let e = OpError::io("rename", target, e);
                tracing::warn!(error = %e, "rename failed");
                self.console.push(format!("Error renaming: {}", e));
            }
        }
    }

    // Console commands

    /// Runs the prompt line: `cd` here and now, anything else as a background job.
    fn submit_command(&mut self, fx: &mut Effects) {
        let line = self.console_input.take();
        let input = line.trim();
        if input.is_empty() {
            return;
        }

        let mut tokens = input.split_whitespace();
        if tokens.next() == Some("cd") {
            self.builtin_cd(input, tokens.next());
            return;
        }

        self.console.push(format!("$ {}", input));
        match self.policy.check(input) {
            Ok(_) => {
                tracing::info!(command = %input, "launching command");
                fx.launch(Job::Command {
                    line: input.to_string(),
                    cwd: self.active_panel().dir().to_path_buf(),
                    policy: self.policy.clone(),
                });
            }
            Err(OpError::CommandRejected(name)) => {
                tracing::info!(command = %name, "command rejected by allow-list");
                self.console.push(format!("command not allowed: {}", name));
            }
            Err(e) => self.console.push(format!("Error: {}", e)),
        }
    }

    fn builtin_cd(&mut self, input: &str, arg: Option<&str>) {
        let base = self.active_panel().dir().to_path_buf();
        let Some(target) = resolve_cd_target(arg, &base, self.home.as_deref()) else {
            self.console.push(format!("$ {}\ncd: no home directory", input));
            return;
        };

        if target.is_dir() {
            self.console
                .push(format!("$ {}\n--> cd {}", input, target.display()));
            self.active_panel_mut().set_dir(target);
            self.panel_mut(self.active.other()).clear_selection();
        } else {
            self.console.push(format!(
                "$ {}\ncd: no such directory: {}",
                input,
                target.display()
            ));
        }
    }

    // Job results

    /// Takes in the single terminal result of a background job.
    pub(super) fn absorb_job(&mut self, result: JobResult) {
        // destination on success, source on failure
        let subject = result.copy_path().map(|p| p.display().to_string());
        match result {
            JobResult::CopyDone { dest, error, .. } => {
                self.in_flight.remove(&dest);
                let subject = subject.unwrap_or_default();
                match error {
                    None => {
                        tracing::info!(dest = %dest.display(), "copy finished");
                        self.console.push(format!("Copied {} successfully!", subject));
                        self.flash = Some(format!("Copied: {}", subject));
                    }
                    Some(e) => {
                        self.console.push(format!("Failed to copy {}: {}", subject, e));
                        self.flash = Some(format!("Error copying {}", subject));
                    }
                }
                // a failed copy may leave a partial tree behind
                self.refresh_after_change(&dest);
            }
            JobResult::CommandResult {
                command,
                output,
                error,
            } => {
                if let Some(e) = error {
                    tracing::warn!(command = %command, error = %e, "command failed");
                    self.console.push(format!("Error: {}", e));
                }
                self.console.push_output(&output);
            }
        }
    }

    // Helpers

    /// Re-lists every panel whose directory contains `changed`, or is `changed`.
    pub(super) fn refresh_after_change(&mut self, changed: &Path) {
        let rows = self.visible_rows();
        for panel in &mut self.panels {
            if panel.is_affected_by(changed) {
                panel.reload();
                panel.clamp_scroll(rows);
            }
        }
    }

    pub(super) fn clear_selections(&mut self) {
        for panel in &mut self.panels {
            panel.clear_selection();
        }
    }
}
