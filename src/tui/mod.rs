// Entry point and main loop for the TUI application.
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::context::SharedContext;
use crate::tui::state::{AppState, InputMode};
use crate::tui::view::{draw, form_modal_area};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

pub fn run(ctx: SharedContext) -> Result<()> {
    // A missing config file means defaults; anything else (syntax,
    // permissions) is reported instead of silently replaced.
    let config = match Config::load(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) if Config::is_missing_config_error(&e) => Config::default(),
        Err(e) => return Err(e),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(ctx, config);
    log::info!("TUI started with {} tasks", app_state.store.len());

    let result = run_event_loop(&mut terminal, &mut app_state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

/// Synchronous, single-threaded loop: each input event runs to completion
/// (mutation and persistence included) before the next draw and read.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Mouse(mouse) => match app_state.mode {
                InputMode::Normal => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                // A click on the backdrop (outside the form) cancels, like
                // clicking next to a modal dialog.
                mode => {
                    if let MouseEventKind::Down(_) = mouse.kind {
                        let modal = form_modal_area(terminal.get_frame().area());
                        if !modal.contains((mouse.column, mouse.row).into()) {
                            match mode {
                                InputMode::Creating => app_state.cancel_create(),
                                _ => app_state.cancel_edit(),
                            }
                        }
                    }
                }
            },
            Event::Key(key) => {
                // Filter out KeyRelease events to prevent double input on Windows
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if handlers::handle_key_event(key, app_state) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}
