//! Application state and dispatcher for twinpane.
//!
//! [AppState] owns every piece of mutable application state: both panels, the
//! clipboard, the console log and prompt, the console animation and the rename modal.
//! The event loop feeds it one [AppEvent] at a time through [AppState::dispatch],
//! which mutates the state and answers with [Effects]: background jobs to launch,
//! whether to arm the animation tick, and whether to quit.
//!
//! Dispatch never blocks on a background job and never runs concurrently with itself.
//! Job completions come back in as [AppEvent::Job] in whatever order they finish.
//!
//! Input modes are checked in this order:
//! 1. rename modal: only the confirm/cancel keys are interpreted, the rest is edited
//! 2. console focused: global keys and submit, the rest goes to the prompt
//! 3. normal: the full key table

use crate::app::animator::{Animator, ConsoleMode};
use crate::app::clipboard::Clipboard;
use crate::app::console::ConsoleLog;
use crate::app::input::TextInput;
use crate::app::keymap::Keymap;
use crate::app::panel::{PanelId, PanelState};
use crate::app::rename::RenameState;
use crate::config::Config;
use crate::core::{CommandPolicy, Job, JobResult};
use crate::utils::get_home;

use crossterm::event::KeyEvent;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rows of each pane taken by its border and the status line.
pub const PANE_CHROME_ROWS: u16 = 3;

/// One unit of input to the dispatcher.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Job(JobResult),
    Resize(u16, u16),
    Tick,
}

/// What the event loop has to do after a dispatch.
#[derive(Debug, Default)]
pub struct Effects {
    jobs: Vec<Job>,
    arm_tick: bool,
    quit: bool,
}

impl Effects {
    #[inline]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Hands over the jobs to launch.
    pub fn take_jobs(&mut self) -> Vec<Job> {
        std::mem::take(&mut self.jobs)
    }

    #[inline]
    pub fn arm_tick(&self) -> bool {
        self.arm_tick
    }

    #[inline]
    pub fn quit(&self) -> bool {
        self.quit
    }

    pub(super) fn launch(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub(super) fn request_tick(&mut self) {
        self.arm_tick = true;
    }

    pub(super) fn request_quit(&mut self) {
        self.quit = true;
    }
}

/// Size of the terminal viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub width: u16,
    pub height: u16,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Main struct which holds the central application state of twinpane
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) metrics: LayoutMetrics,

    pub(super) panels: [PanelState; 2],
    pub(super) active: PanelId,
    pub(super) clipboard: Clipboard,

    pub(super) console: ConsoleLog,
    pub(super) console_input: TextInput,
    pub(super) console_focused: bool,
    pub(super) console_mode: ConsoleMode,
    pub(super) animator: Animator,

    pub(super) rename: Option<RenameState>,

    /// Destinations of copies still running; no new paste may pick one of them.
    pub(super) in_flight: HashSet<PathBuf>,
    pub(super) flash: Option<String>,
    pub(super) home: Option<PathBuf>,
    pub(super) policy: Arc<CommandPolicy>,
}

impl<'a> AppState<'a> {
    /// Opens both panels at the current working directory.
    ///
    /// Failing to resolve that directory is the only fatal startup error.
    pub fn new(config: &'a Config) -> std::io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Ok(Self::from_dir(config, &current_dir))
    }

    /// Opens both panels at `initial_path`.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> Self {
        let general = config.general();
        let console = config.console();
        let panel = || {
            PanelState::new(
                initial_path.to_path_buf(),
                general.show_hidden(),
                general.dirs_first(),
            )
        };

        let console_mode = ConsoleMode::default();
        let height = console_mode.target_height(LayoutMetrics::default().height, console.compact_height());

        Self {
            config,
            keymap: Keymap::from_keys(config.keys()),
            metrics: LayoutMetrics::default(),
            panels: [panel(), panel()],
            active: PanelId::Left,
            clipboard: Clipboard::default(),
            console: ConsoleLog::new(console.welcome().iter().cloned()),
            console_input: TextInput::default(),
            console_focused: false,
            console_mode,
            animator: Animator::new(height),
            rename: None,
            in_flight: HashSet::new(),
            flash: None,
            home: get_home(),
            policy: Arc::new(console.command_policy()),
        }
    }

    /// Replaces the home directory used by the `cd` builtin.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Applies one event and reports what the event loop has to do next.
    pub fn dispatch(&mut self, event: AppEvent) -> Effects {
        let mut fx = Effects::default();
        match event {
            AppEvent::Key(key) => self.handle_key(key, &mut fx),
            AppEvent::Job(result) => self.absorb_job(result),
            AppEvent::Resize(width, height) => self.handle_resize(width, height, &mut fx),
            AppEvent::Tick => {
                if self.animator.tick() {
                    fx.request_tick();
                }
                self.clamp_scrolls();
            }
        }
        fx
    }

    fn handle_key(&mut self, key: KeyEvent, fx: &mut Effects) {
        self.flash = None;
        if self.rename.is_some() {
            self.handle_rename_key(key);
        } else if self.console_focused {
            self.handle_console_key(key, fx);
        } else {
            self.handle_normal_key(key, fx);
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16, fx: &mut Effects) {
        self.metrics = LayoutMetrics { width, height };

        let mut target = self.animator.target().min(height);
        if self.console_mode == ConsoleMode::Expanded {
            target = height / 2;
        }
        if target != self.animator.target() {
            self.retarget_console(target, fx);
        }
        self.clamp_scrolls();
    }

    pub(super) fn retarget_console(&mut self, target: u16, fx: &mut Effects) {
        tracing::debug!(from = self.animator.current(), to = target, "console retarget");
        self.animator.set_target(target);
        fx.request_tick();
    }

    pub(super) fn clamp_scrolls(&mut self) {
        let rows = self.visible_rows();
        for panel in &mut self.panels {
            panel.clamp_scroll(rows);
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[inline]
    pub fn panel(&self, id: PanelId) -> &PanelState {
        &self.panels[id.index()]
    }

    #[inline]
    pub(super) fn panel_mut(&mut self, id: PanelId) -> &mut PanelState {
        &mut self.panels[id.index()]
    }

    #[inline]
    pub fn active(&self) -> PanelId {
        self.active
    }

    #[inline]
    pub fn active_panel(&self) -> &PanelState {
        self.panel(self.active)
    }

    #[inline]
    pub(super) fn active_panel_mut(&mut self) -> &mut PanelState {
        self.panel_mut(self.active)
    }

    #[inline]
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    #[inline]
    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    #[inline]
    pub fn console_input(&self) -> &TextInput {
        &self.console_input
    }

    #[inline]
    pub fn is_console_focused(&self) -> bool {
        self.console_focused
    }

    #[inline]
    pub fn console_mode(&self) -> ConsoleMode {
        self.console_mode
    }

    #[inline]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[inline]
    pub fn rename(&self) -> Option<&RenameState> {
        self.rename.as_ref()
    }

    #[inline]
    pub fn pending_copies(&self) -> usize {
        self.in_flight.len()
    }

    #[inline]
    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    #[inline]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Entry rows each pane can show with the console at its current height.
    pub fn visible_rows(&self) -> usize {
        let chrome = self.animator.current().saturating_add(PANE_CHROME_ROWS);
        usize::from(self.metrics.height.saturating_sub(chrome).max(1))
    }
}
