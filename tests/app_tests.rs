//! Dispatcher-level tests for twinpane.
//!
//! These tests drive [AppState] only through [AppState::dispatch], the same way the
//! terminal loop does, and run background jobs on the test thread with `run_job` so
//! their completions arrive in a known order.
//!
//! Every test works inside its own temporary directory, removed when the test ends.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use std::collections::HashSet;
use std::error;
use std::ffi::OsString;
use std::fs;
use tempfile::tempdir;
use twinpane::app::{Animator, AppEvent, AppState, ConsoleMode, Effects, PanelId};
use twinpane::config::Config;
use twinpane::core::run_job;

fn press(app: &mut AppState, code: KeyCode) -> Effects {
    app.dispatch(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn alt(app: &mut AppState, code: KeyCode) -> Effects {
    app.dispatch(AppEvent::Key(KeyEvent::new(code, KeyModifiers::ALT)))
}

fn submit(app: &mut AppState, line: &str) -> Effects {
    for c in line.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter)
}

fn move_cursor_to(app: &mut AppState, index: usize) {
    while app.active_panel().cursor() > 0 {
        press(app, KeyCode::Up);
    }
    for _ in 0..index {
        press(app, KeyCode::Down);
    }
}

#[test]
fn test_selection_follows_toggle_parity() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    for i in 0..8 {
        fs::write(temp.path().join(format!("f{i}.txt")), "x")?;
    }
    let mut app = AppState::from_dir(&config, temp.path());
    let names: Vec<OsString> = app
        .active_panel()
        .entries()
        .iter()
        .map(|e| e.name().to_os_string())
        .collect();
    assert_eq!(names.len(), 8);

    let mut rng = rand::rng();
    let mut toggles = vec![0usize; names.len()];
    for _ in 0..40 {
        let idx = rng.random_range(0..names.len());
        move_cursor_to(&mut app, idx);
        press(&mut app, KeyCode::Char(' '));
        toggles[idx] += 1;
    }

    let expected: HashSet<OsString> = names
        .iter()
        .zip(&toggles)
        .filter(|(_, n)| *n % 2 == 1)
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(app.active_panel().selected(), &expected);
    Ok(())
}

#[test]
fn test_directory_change_resets_panels() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "a")?;
    fs::create_dir(temp.path().join("sub"))?;
    fs::write(temp.path().join("sub/inner.txt"), "i")?;
    let mut app = AppState::from_dir(&config, temp.path());

    // left: select a.txt
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.panel(PanelId::Left).selected().len(), 1);

    // right: select then enter sub
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.active(), PanelId::Right);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    let right = app.panel(PanelId::Right);
    assert_eq!(right.dir(), temp.path().join("sub"));
    assert_eq!(right.cursor(), 0);
    assert_eq!(right.scroll(), 0);
    assert!(right.selected().is_empty());
    assert!(app.panel(PanelId::Left).selected().is_empty());

    press(&mut app, KeyCode::Left);
    assert_eq!(app.panel(PanelId::Right).dir(), temp.path());
    assert_eq!(app.panel(PanelId::Right).cursor(), 0);
    Ok(())
}

#[test]
fn test_rejected_command_spawns_nothing() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let mut app = AppState::from_dir(&config, temp.path());

    alt(&mut app, KeyCode::Up);
    assert!(app.is_console_focused());

    let before = app.console().len();
    let fx = submit(&mut app, "touch created");
    assert!(fx.jobs().is_empty());
    assert!(!temp.path().join("created").exists());

    let new_lines = &app.console().lines()[before..];
    let rejections = new_lines
        .iter()
        .filter(|l| l.starts_with("command not allowed"))
        .count();
    assert_eq!(rejections, 1);
    assert_eq!(
        app.console().lines().last().map(String::as_str),
        Some("command not allowed: touch")
    );
    Ok(())
}

#[test]
fn test_allowed_command_output_reaches_console() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let mut app = AppState::from_dir(&config, temp.path());

    alt(&mut app, KeyCode::Up);
    let mut fx = submit(&mut app, "echo twinpane");
    let jobs = fx.take_jobs();
    assert_eq!(jobs.len(), 1);
    for job in jobs {
        app.dispatch(AppEvent::Job(run_job(job)));
    }
    assert_eq!(
        app.console().lines().last().map(String::as_str),
        Some("twinpane")
    );
    Ok(())
}

#[test]
fn test_cd_builtin() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let home = temp.path().join("home");
    fs::create_dir(&home)?;
    let work = temp.path().join("work");
    fs::create_dir(&work)?;
    let mut app = AppState::from_dir(&config, &work).with_home(Some(home.clone()));

    alt(&mut app, KeyCode::Up);
    let fx = submit(&mut app, "cd nowhere");
    assert!(fx.jobs().is_empty());
    assert_eq!(app.active_panel().dir(), work);
    let last = app.console().lines().last().cloned().unwrap_or_default();
    assert!(last.starts_with("cd: no such directory:"), "got {last:?}");

    submit(&mut app, "cd");
    assert_eq!(app.active_panel().dir(), home);
    assert_eq!(app.panel(PanelId::Right).dir(), work);

    submit(&mut app, "cd ../work");
    assert_eq!(app.active_panel().dir(), work);
    Ok(())
}

#[test]
fn test_console_cycle_animates_to_target() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let mut app = AppState::from_dir(&config, temp.path());
    app.dispatch(AppEvent::Resize(100, 40));

    let fx = app.dispatch(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('t'),
        KeyModifiers::CONTROL,
    )));
    assert!(fx.arm_tick());
    assert_eq!(app.console_mode(), ConsoleMode::Expanded);
    assert_eq!(app.animator().target(), 20);

    let mut ticks = 0;
    while app.dispatch(AppEvent::Tick).arm_tick() {
        assert!(app.animator().current() <= 20);
        ticks += 1;
        assert!(ticks < 40, "animation did not converge");
    }
    assert_eq!(app.animator().current(), 20);
    assert!(!app.animator().is_running());
    Ok(())
}

#[test]
fn test_animator_converges_without_overshoot() {
    let mut animator = Animator::new(0);
    animator.set_target(100);

    let mut ticks = 0;
    while animator.tick() {
        assert!(animator.current() <= 100);
        ticks += 1;
        assert!(ticks < 40, "animation did not converge");
    }
    assert_eq!(animator.current(), 100);

    animator.set_target(40);
    assert!(animator.tick());
    let here = animator.current();
    animator.set_target(here);
    assert!(!animator.tick());
    assert!(!animator.is_running());
    assert_eq!(animator.current(), here);
}

#[test]
fn test_delete_only_entry() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("only.txt"), "x")?;
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Char('D'));
    assert!(!temp.path().join("only.txt").exists());
    assert!(app.active_panel().entries().is_empty());
    assert_eq!(app.active_panel().cursor(), 0);
    assert!(app.panel(PanelId::Right).entries().is_empty());
    assert_eq!(
        app.console().lines().last().map(String::as_str),
        Some("Deleted: only.txt")
    );

    press(&mut app, KeyCode::Char('D'));
    assert_eq!(
        app.console().lines().last().map(String::as_str),
        Some("Nothing to delete.")
    );
    Ok(())
}

#[test]
fn test_two_entry_paste_with_one_failure() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "a")?;
    fs::write(temp.path().join("b.txt"), "b")?;
    fs::create_dir(temp.path().join("dest"))?;
    let mut app = AppState::from_dir(&config, temp.path());

    // a.txt, b.txt, dest
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.clipboard().sources().len(), 2);

    press(&mut app, KeyCode::Tab);
    move_cursor_to(&mut app, 2);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.active_panel().dir(), temp.path().join("dest"));

    let mut fx = press(&mut app, KeyCode::Char('p'));
    let jobs = fx.take_jobs();
    assert_eq!(jobs.len(), 2);
    assert_eq!(app.pending_copies(), 2);

    fs::remove_file(temp.path().join("b.txt"))?;

    let before = app.console().len();
    for job in jobs {
        app.dispatch(AppEvent::Job(run_job(job)));
    }
    let new_lines = &app.console().lines()[before..];
    assert_eq!(new_lines.len(), 2, "got {new_lines:?}");
    assert_eq!(new_lines.iter().filter(|l| l.starts_with("Copied ")).count(), 1);
    assert_eq!(
        new_lines.iter().filter(|l| l.starts_with("Failed to copy")).count(),
        1
    );

    assert_eq!(app.pending_copies(), 0);
    assert!(temp.path().join("dest/a.txt").exists());
    assert!(!temp.path().join("dest/b.txt").exists());
    assert_eq!(app.active_panel().entries().len(), 1);
    Ok(())
}

#[test]
fn test_paste_never_overwrites() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "new")?;
    fs::create_dir(temp.path().join("dest"))?;
    fs::write(temp.path().join("dest/a.txt"), "old")?;
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Char('c'));
    press(&mut app, KeyCode::Tab);
    move_cursor_to(&mut app, 1);
    press(&mut app, KeyCode::Enter);

    let mut fx = press(&mut app, KeyCode::Char('p'));
    for job in fx.take_jobs() {
        app.dispatch(AppEvent::Job(run_job(job)));
    }

    assert_eq!(fs::read_to_string(temp.path().join("dest/a.txt"))?, "old");
    assert_eq!(fs::read_to_string(temp.path().join("dest/a_1.txt"))?, "new");
    Ok(())
}

#[test]
fn test_move_then_paste_moves_entry() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    fs::write(temp.path().join("a.txt"), "a")?;
    fs::create_dir(temp.path().join("dest"))?;
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Char('m'));
    assert_eq!(
        app.console().lines().last().map(String::as_str),
        Some("Ready to move.")
    );
    press(&mut app, KeyCode::Tab);
    move_cursor_to(&mut app, 1);
    press(&mut app, KeyCode::Enter);

    let fx = press(&mut app, KeyCode::Char('p'));
    assert!(fx.jobs().is_empty());
    assert!(!temp.path().join("a.txt").exists());
    assert!(temp.path().join("dest/a.txt").exists());

    // left panel still lists the old directory and was refreshed
    let left: Vec<_> = app
        .panel(PanelId::Left)
        .entries()
        .iter()
        .map(|e| e.name_str().into_owned())
        .collect();
    assert_eq!(left, vec!["dest".to_string()]);
    Ok(())
}

#[test]
fn test_quit_requested() -> Result<(), Box<dyn error::Error>> {
    let config = Config::default();
    let temp = tempdir()?;
    let mut app = AppState::from_dir(&config, temp.path());
    assert!(press(&mut app, KeyCode::Char('q')).quit());
    Ok(())
}
