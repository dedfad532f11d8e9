//! Terminal rendering and event loop for twinpane.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and turns terminal events, finished jobs and animation ticks into
//! [AppEvent]s for the dispatcher.

use crate::app::{AppEvent, AppState, Effects, Ticker};
use crate::core::Workers;
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{
    io,
    time::{Duration, Instant},
};

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit.
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(app: &mut AppState, workers: &Workers) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app, workers);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop of twinpane: drains job results, fires animation ticks,
/// draws and polls for terminal events. Returns on quit.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    workers: &Workers,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let mut ticker = Ticker::new(app.config().console().tick_interval());

    let size = terminal.size()?;
    let fx = app.dispatch(AppEvent::Resize(size.width, size.height));
    if apply_effects(fx, workers, &mut ticker) {
        return Ok(());
    }
    let mut dirty = true;

    loop {
        while let Ok(result) = workers.response_rx().try_recv() {
            let fx = app.dispatch(AppEvent::Job(result));
            if apply_effects(fx, workers, &mut ticker) {
                return Ok(());
            }
            dirty = true;
        }

        if ticker.fire(Instant::now()) {
            let fx = app.dispatch(AppEvent::Tick);
            if apply_effects(fx, workers, &mut ticker) {
                return Ok(());
            }
            dirty = true;
        }

        if dirty {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        let timeout = ticker
            .remaining(Instant::now())
            .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

        if event::poll(timeout)? {
            let app_event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            };
            if let Some(app_event) = app_event {
                let fx = app.dispatch(app_event);
                if apply_effects(fx, workers, &mut ticker) {
                    return Ok(());
                }
                dirty = true;
            }
        }
    }
}

/// Carries out what the dispatcher asked for. Returns true on quit.
fn apply_effects(mut fx: Effects, workers: &Workers, ticker: &mut Ticker) -> bool {
    for job in fx.take_jobs() {
        workers.submit(job);
    }
    if fx.arm_tick() {
        ticker.arm(Instant::now());
    }
    fx.quit()
}
