// Handles keyboard input for the TUI.
//
// Every handler runs to completion (mutation, persistence) before the
// next event is read; the caller redraws after each one.
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Dispatches a key event against the current mode. Returns `true` when
/// the application should quit.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> bool {
    match state.mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => state.start_create(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = state.selected_task_id() {
                    state.open_edit(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => state.delete_selected(),
            KeyCode::Char(' ') => state.toggle_selected(),
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.previous(),
            _ => {}
        },
        InputMode::Creating => match key.code {
            KeyCode::Esc => state.cancel_create(),
            KeyCode::Enter => state.submit_create(),
            KeyCode::Tab | KeyCode::Down => state.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.form.focus_previous(),
            code => handle_field_key(state, code),
        },
        InputMode::Editing => match key.code {
            // Escape discards unconditionally, matching the cancel control.
            KeyCode::Esc => state.cancel_edit(),
            KeyCode::Enter => state.commit_edit(),
            KeyCode::Tab | KeyCode::Down => state.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => state.form.focus_previous(),
            code => handle_field_key(state, code),
        },
    }
    false
}

fn handle_field_key(state: &mut AppState, code: KeyCode) {
    let field = state.form.focused_field_mut();
    match code {
        KeyCode::Char(c) => field.enter_char(c),
        KeyCode::Backspace => field.delete_char(),
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        _ => {}
    }
}
