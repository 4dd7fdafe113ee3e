use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::delete;
use crate::scanner::spawn_scan;

pub mod app;
pub mod nav;
pub mod render;

use app::App;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Refresh interval while idle; the display keeps showing scan progress even
/// without input.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the interactive session: terminal setup, the event cycle, teardown.
///
/// The terminal is always restored, including when the loop errors out.
pub fn run(root: &Path, marker: &str, workers: usize) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.clear().context("failed to clear terminal")?;

    let result = run_loop(&mut terminal, root, marker, workers);

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

/// The event cycle: drain scan output, render, poll one key, apply it.
///
/// Single-threaded and cooperative; the scan channel is the only crossing
/// from the worker domain, and records are mutated only here once drained.
fn run_loop(terminal: &mut Tui, root: &Path, marker: &str, workers: usize) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    // Detached on purpose: quitting tears the process down, and both probing
    // and deletion are inert when interrupted.
    let _scan = spawn_scan(root.to_path_buf(), marker.to_string(), workers, tx);

    let mut app = App::new(root.to_path_buf(), marker.to_string());

    loop {
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
        app.clamp();

        terminal
            .draw(|frame| render::draw(frame, &mut app))
            .context("failed to draw frame")?;

        if !event::poll(INPUT_POLL).context("failed to poll for events")? {
            continue;
        }
        let key = match event::read().context("failed to read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        let update = nav::apply_key(
            key,
            app.selected(),
            app.scroll(),
            app.store().len(),
            app.viewport(),
        );
        app.set_cursor(update.selected, update.scroll);

        if update.quit {
            break;
        }
        if update.mark {
            app.toggle_mark_and_advance();
        }
        if update.delete {
            run_delete_workflow(terminal, &mut app)?;
        }
    }

    Ok(())
}

/// The destructive path: confirm modal, then a synchronous batch delete.
///
/// Deletion blocks the cycle for its duration; batches are small and
/// user-initiated, and the transient "Deleting..." frame is rendered first.
fn run_delete_workflow(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let targets = app.delete_targets();
    if targets.is_empty() {
        return Ok(());
    }

    app.open_confirm(targets.clone());
    terminal
        .draw(|frame| render::draw(frame, app))
        .context("failed to draw confirmation")?;
    let confirm = wait_for_key().context("failed to read confirmation")?;
    app.close_confirm();

    // Anything but an explicit yes cancels with no side effects.
    if !matches!(confirm.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        return Ok(());
    }

    app.begin_deleting(&targets);
    terminal
        .draw(|frame| render::draw(frame, app))
        .context("failed to draw delete progress")?;
    delete::delete_batch(app.store_mut(), &targets);

    Ok(())
}

/// Blocks for exactly one key press: the single place the UI reads without
/// a timeout, bounded by requiring one keystroke.
fn wait_for_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}
