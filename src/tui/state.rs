// Manages the application state for the TUI.
use crate::config::Config;
use crate::context::SharedContext;
use crate::model::parse_due_input;
use crate::store::TaskStore;
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Creating,
    Editing,
}

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    DueDate,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::DueDate,
            FormField::DueDate => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::DueDate,
            FormField::Description => FormField::Title,
            FormField::DueDate => FormField::Description,
        }
    }
}

/// A single-line text input with UTF-8 safe cursor handling.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    pub buffer: String,
    pub cursor: usize,
}

impl InputField {
    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.chars().count();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_sub(1));
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(1));
    }

    pub fn enter_char(&mut self, new_char: char) {
        // Safe insertion for UTF-8 strings
        let byte_index = self
            .buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.buffer.len());

        self.buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor != 0 {
            let current_index = self.cursor;
            let before = self.buffer.chars().take(current_index - 1);
            let after = self.buffer.chars().skip(current_index);
            self.buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }

    fn clamp_cursor(&self, pos: usize) -> usize {
        pos.clamp(0, self.buffer.chars().count())
    }
}

/// The three inputs shared by the create form and the edit modal.
#[derive(Debug, Default, Clone)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due_date: InputField,
    pub focus: FormField,
}

impl TaskForm {
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.due_date.clear();
        self.focus = FormField::Title;
    }

    pub fn focused_field_mut(&mut self) -> &mut InputField {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::DueDate => &mut self.due_date,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }
}

pub struct AppState {
    // Data
    pub store: TaskStore,
    pub config: Config,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub form: TaskForm,
    pub message: String,

    /// Target of the in-flight edit. The modal is open iff this is Some,
    /// which in turn holds iff `mode == Editing`.
    pub edit_target: Option<i64>,
}

impl AppState {
    pub fn new(ctx: SharedContext, config: Config) -> Self {
        let store = TaskStore::load(ctx);
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            store,
            config,
            list_state,
            mode: InputMode::Normal,
            form: TaskForm::default(),
            message: "Ready.".to_string(),
            edit_target: None,
        }
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        let idx = self.list_state.selected()?;
        self.store.tasks().get(idx).map(|t| t.id)
    }

    /// Keeps the selection inside the list after deletes; clears it when
    /// the list becomes empty.
    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.min(len - 1)));
        }
    }

    // --- NAVIGATION ---

    pub fn next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    // --- CREATE FORM ---

    pub fn start_create(&mut self) {
        self.form.reset();
        self.mode = InputMode::Creating;
        self.message = "Enter a title, Tab to switch fields, Enter to save.".to_string();
    }

    /// Commits the create form. Stays in Creating mode with the input
    /// retained when the title is empty or the due date does not parse.
    pub fn submit_create(&mut self) {
        let due = match parse_due_input(&self.form.due_date.buffer) {
            Ok(due) => due,
            Err(_) => {
                self.message = "Invalid due date (use YYYY-MM-DD).".to_string();
                return;
            }
        };
        match self.store.create(
            &self.form.title.buffer,
            &self.form.description.buffer,
            due,
        ) {
            Ok(task) => {
                self.message = format!("Added '{}'.", task.title);
                self.form.reset();
                self.mode = InputMode::Normal;
                // Select the task that was just appended.
                self.list_state.select(Some(self.store.len() - 1));
            }
            Err(e) => {
                self.message = e.to_string();
                self.form.focus = FormField::Title;
            }
        }
    }

    pub fn cancel_create(&mut self) {
        self.form.reset();
        self.mode = InputMode::Normal;
        self.message = "Ready.".to_string();
    }

    // --- EDIT SESSION ---

    /// Opens the edit modal for the given task. A non-existent id leaves
    /// the session closed. Fields are pre-filled from the task's current
    /// values and focus lands on the title.
    pub fn open_edit(&mut self, id: i64) {
        let Some(task) = self.store.get(id) else {
            return;
        };
        self.form.title.set(&task.title);
        self.form.description.set(&task.description);
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        self.form.due_date.set(&due);
        self.form.focus = FormField::Title;
        self.edit_target = Some(id);
        self.mode = InputMode::Editing;
        self.message = "Editing. Enter to save, Esc to cancel.".to_string();
    }

    /// Commits the in-flight edit. An empty title (or unparseable due date)
    /// keeps the modal open with the buffers intact.
    pub fn commit_edit(&mut self) {
        let Some(id) = self.edit_target else {
            return;
        };
        let due = match parse_due_input(&self.form.due_date.buffer) {
            Ok(due) => due,
            Err(_) => {
                self.message = "Invalid due date (use YYYY-MM-DD).".to_string();
                return;
            }
        };
        match self.store.update(
            id,
            &self.form.title.buffer,
            &self.form.description.buffer,
            due,
        ) {
            Ok(()) => {
                self.message = "Saved.".to_string();
                self.close_edit();
            }
            Err(e) => {
                self.message = e.to_string();
                self.form.focus = FormField::Title;
            }
        }
    }

    /// Discards any unsaved edits unconditionally.
    pub fn cancel_edit(&mut self) {
        self.close_edit();
        self.message = "Edit cancelled.".to_string();
    }

    fn close_edit(&mut self) {
        self.edit_target = None;
        self.form.reset();
        self.mode = InputMode::Normal;
    }

    // --- LIST ACTIONS ---

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.toggle_complete(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.store.delete(id);
            self.clamp_selection();
            self.message = "Task deleted.".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::sync::Arc;

    fn empty_state() -> AppState {
        AppState::new(Arc::new(TestContext::new()), Config::default())
    }

    fn state_with_tasks(titles: &[&str]) -> AppState {
        let mut state = empty_state();
        for t in titles {
            state.store.create(t, "", None).unwrap();
        }
        state.list_state.select(Some(0));
        state
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = state_with_tasks(&["a", "b", "c"]);

        state.next();
        assert_eq!(state.list_state.selected(), Some(1));
        state.next();
        assert_eq!(state.list_state.selected(), Some(2));
        state.next();
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = state_with_tasks(&["a", "b", "c"]);

        state.previous();
        assert_eq!(state.list_state.selected(), Some(2));
        state.previous();
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = empty_state();
        // Should not panic
        state.next();
        state.previous();
    }

    #[test]
    fn test_cursor_clamping() {
        let mut field = InputField::default();
        field.set("abc");
        field.cursor = 0;

        field.move_cursor_right();
        field.move_cursor_right();
        field.move_cursor_right();
        field.move_cursor_right(); // Should stay 3
        assert_eq!(field.cursor, 3);

        field.move_cursor_left();
        field.move_cursor_left();
        field.move_cursor_left();
        field.move_cursor_left(); // Should stay 0
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_multibyte_insert_and_delete() {
        let mut field = InputField::default();
        field.enter_char('é');
        field.enter_char('b');
        assert_eq!(field.buffer, "éb");

        field.move_cursor_left();
        field.delete_char();
        assert_eq!(field.buffer, "b");
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_open_edit_prefills_fields() {
        let mut state = empty_state();
        let id = state
            .store
            .create("Title", "Desc", chrono::NaiveDate::from_ymd_opt(2024, 1, 5))
            .unwrap()
            .id;

        state.open_edit(id);

        assert_eq!(state.mode, InputMode::Editing);
        assert_eq!(state.edit_target, Some(id));
        assert_eq!(state.form.title.buffer, "Title");
        assert_eq!(state.form.description.buffer, "Desc");
        assert_eq!(state.form.due_date.buffer, "2024-01-05");
        assert_eq!(state.form.focus, FormField::Title);
    }

    #[test]
    fn test_open_edit_unknown_id_stays_closed() {
        let mut state = state_with_tasks(&["a"]);
        state.open_edit(424242);

        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.edit_target, None);
    }

    #[test]
    fn test_commit_edit_empty_title_stays_open() {
        let mut state = empty_state();
        let id = state.store.create("Keep me", "", None).unwrap().id;

        state.open_edit(id);
        state.form.title.clear();
        state.form.description.set("typed");
        state.commit_edit();

        // Modal stays open, buffers intact, task untouched.
        assert_eq!(state.mode, InputMode::Editing);
        assert_eq!(state.edit_target, Some(id));
        assert_eq!(state.form.description.buffer, "typed");
        assert_eq!(state.store.get(id).unwrap().title, "Keep me");
    }

    #[test]
    fn test_commit_edit_applies_and_closes() {
        let mut state = empty_state();
        let id = state.store.create("Old", "", None).unwrap().id;

        state.open_edit(id);
        state.form.title.set("New title");
        state.form.due_date.set("2024-03-09");
        state.commit_edit();

        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.edit_target, None);
        let task = state.store.get(id).unwrap();
        assert_eq!(task.title, "New title");
        assert_eq!(
            task.due_date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn test_cancel_edit_discards_changes() {
        let mut state = empty_state();
        let id = state.store.create("Original", "", None).unwrap().id;

        state.open_edit(id);
        state.form.title.set("Unsaved");
        state.cancel_edit();

        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.edit_target, None);
        assert_eq!(state.store.get(id).unwrap().title, "Original");
    }

    #[test]
    fn test_reopen_starts_fresh_session() {
        let mut state = empty_state();
        let a = state.store.create("A", "", None).unwrap().id;
        let b = state.store.create("B", "", None).unwrap().id;

        state.open_edit(a);
        state.form.title.set("half-typed");
        state.cancel_edit();

        state.open_edit(b);
        assert_eq!(state.edit_target, Some(b));
        assert_eq!(state.form.title.buffer, "B");
    }

    #[test]
    fn test_submit_create_empty_title_keeps_input() {
        let mut state = empty_state();
        state.start_create();
        state.form.description.set("only a description");
        state.submit_create();

        assert_eq!(state.mode, InputMode::Creating);
        assert_eq!(state.form.description.buffer, "only a description");
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_submit_create_selects_new_task() {
        let mut state = state_with_tasks(&["a", "b"]);
        state.start_create();
        state.form.title.set("c");
        state.submit_create();

        assert_eq!(state.mode, InputMode::Normal);
        assert_eq!(state.list_state.selected(), Some(2));
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let mut state = state_with_tasks(&["a", "b"]);
        state.list_state.select(Some(1));
        state.delete_selected();
        assert_eq!(state.list_state.selected(), Some(0));

        state.delete_selected();
        assert_eq!(state.list_state.selected(), None);
        assert!(state.store.is_empty());
    }
}
