//! Console height animation for twinpane.
//!
//! The [Animator] steps the displayed console height toward a target height, one step
//! per tick, and the [Ticker] schedules those ticks. The animator never sleeps or reads
//! the clock itself: the dispatcher arms the ticker whenever a step asks for another
//! tick, and the event loop turns a due ticker into a tick event.

use std::time::{Duration, Instant};

/// The four fixed console layouts cycled by the console-mode action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMode {
    Hidden,
    #[default]
    Compact,
    Expanded,
    HiddenTop,
}

impl ConsoleMode {
    pub fn next(self) -> Self {
        match self {
            ConsoleMode::Hidden => ConsoleMode::Compact,
            ConsoleMode::Compact => ConsoleMode::Expanded,
            ConsoleMode::Expanded => ConsoleMode::HiddenTop,
            ConsoleMode::HiddenTop => ConsoleMode::Hidden,
        }
    }

    /// Target console height of this mode for a viewport of `viewport_height` rows.
    pub fn target_height(self, viewport_height: u16, compact: u16) -> u16 {
        match self {
            ConsoleMode::Hidden => 0,
            ConsoleMode::Compact => compact,
            ConsoleMode::Expanded => viewport_height / 2,
            ConsoleMode::HiddenTop => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConsoleMode::Hidden => "hidden",
            ConsoleMode::Compact => "compact",
            ConsoleMode::Expanded => "expanded",
            ConsoleMode::HiddenTop => "hidden-top",
        }
    }
}

/// Displayed and target console height.
///
/// Outside of a tick, `running == false` implies `current == target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animator {
    current: u16,
    target: u16,
    running: bool,
}

impl Animator {
    pub fn new(height: u16) -> Self {
        Self {
            current: height,
            target: height,
            running: false,
        }
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> u16 {
        self.target
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sets a new target and starts animating. The caller arms one tick.
    ///
    /// A target equal to the current height still starts the animator; the next
    /// tick then finds nothing to do and stops it.
    pub fn set_target(&mut self, target: u16) {
        self.target = target;
        self.running = true;
    }

    /// Advances one step toward the target.
    ///
    /// Returns `true` when another tick has to be armed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let diff = i32::from(self.target) - i32::from(self.current);
        if diff == 0 {
            self.running = false;
            return false;
        }
        let mut step = diff / 4;
        if step == 0 {
            step = diff.signum();
        }
        // |step| <= |diff|, so the result stays between current and target.
        self.current = (i32::from(self.current) + step) as u16;
        true
    }
}

/// One-shot timer armed by the animator and polled by the event loop.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedules a tick one interval after `now`. An already armed tick is kept.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Disarms and returns `true` once the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the armed tick, `None` when disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
