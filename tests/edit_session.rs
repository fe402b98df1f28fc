// Edit session state machine: open/commit/cancel against the app state.
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use taskpad::config::Config;
use taskpad::context::TestContext;
use taskpad::tui::handlers::handle_key_event;
use taskpad::tui::state::{AppState, InputMode};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn state_with_one_task(title: &str) -> (AppState, i64) {
    let mut state = AppState::new(Arc::new(TestContext::new()), Config::default());
    let id = state.store.create(title, "", None).unwrap().id;
    state.list_state.select(Some(0));
    (state, id)
}

#[test]
fn test_session_is_closed_until_opened() {
    let (state, _) = state_with_one_task("t");
    assert_eq!(state.mode, InputMode::Normal);
    assert_eq!(state.edit_target, None);
}

#[test]
fn test_open_for_missing_id_stays_closed() {
    let (mut state, _) = state_with_one_task("t");
    state.open_edit(-1);
    assert_eq!(state.mode, InputMode::Normal);
    assert_eq!(state.edit_target, None);
}

#[test]
fn test_commit_updates_task_and_closes() {
    let (mut state, id) = state_with_one_task("Draft");
    state.open_edit(id);

    // Replace the title through the key handler, then save.
    while !state.form.title.buffer.is_empty() {
        handle_key_event(key(KeyCode::Backspace), &mut state);
    }
    for c in "Final".chars() {
        handle_key_event(key(KeyCode::Char(c)), &mut state);
    }
    handle_key_event(key(KeyCode::Enter), &mut state);

    assert_eq!(state.mode, InputMode::Normal);
    assert_eq!(state.edit_target, None);
    assert_eq!(state.store.get(id).unwrap().title, "Final");
}

#[test]
fn test_commit_with_empty_title_keeps_session_open() {
    let (mut state, id) = state_with_one_task("Keep");
    state.open_edit(id);

    while !state.form.title.buffer.is_empty() {
        handle_key_event(key(KeyCode::Backspace), &mut state);
    }
    handle_key_event(key(KeyCode::Enter), &mut state);

    assert_eq!(state.mode, InputMode::Editing);
    assert_eq!(state.edit_target, Some(id));
    assert_eq!(state.store.get(id).unwrap().title, "Keep");
}

#[test]
fn test_escape_always_closes_and_discards() {
    let (mut state, id) = state_with_one_task("Stable");
    state.open_edit(id);
    for c in " changed".chars() {
        handle_key_event(key(KeyCode::Char(c)), &mut state);
    }
    handle_key_event(key(KeyCode::Esc), &mut state);

    assert_eq!(state.mode, InputMode::Normal);
    assert_eq!(state.edit_target, None);
    assert_eq!(state.store.get(id).unwrap().title, "Stable");
}

#[test]
fn test_at_most_one_session_at_a_time() {
    let mut state = AppState::new(Arc::new(TestContext::new()), Config::default());
    let a = state.store.create("A", "", None).unwrap().id;
    let b = state.store.create("B", "", None).unwrap().id;

    state.open_edit(a);
    // Opening a second session replaces the first entirely.
    state.open_edit(b);

    assert_eq!(state.edit_target, Some(b));
    assert_eq!(state.form.title.buffer, "B");
}

#[test]
fn test_edit_after_delete_is_a_noop() {
    let (mut state, id) = state_with_one_task("gone");
    state.store.delete(id);
    state.open_edit(id);
    assert_eq!(state.mode, InputMode::Normal);
}
