//! main.rs
//! Entry point for twinpane

use twinpane::app::AppState;
use twinpane::config::Config;
use twinpane::core::{Workers, terminal};
use twinpane::logging;
use twinpane::utils::cli::{CliAction, handle_args};
use twinpane::utils::resolve_initial_dir;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[twinpane] Error occurred: {}", info);
        tracing::error!(%info, "panic");

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let initial_path = match handle_args() {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => match resolve_initial_dir(&path_arg) {
            Some(target) => Some(target),
            None => {
                eprintln!("\n[twinpane] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
        },
    };

    let _log_guard = logging::init();
    let config = Config::load();

    let mut app = match initial_path {
        Some(path) => AppState::from_dir(&config, &path),
        None => AppState::new(&config)?,
    };
    let workers = Workers::spawn(config.console().worker_threads());

    let result = terminal::run_terminal(&mut app, &workers);
    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    tracing::info!("twinpane exiting");
    result
}
