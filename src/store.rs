// Owns the ordered task list and its persistence.
use crate::context::SharedContext;
use crate::error::ValidationError;
use crate::model::Task;
use crate::storage::LocalStorage;
use chrono::{NaiveDate, Utc};

/// The single owner of the task list.
///
/// Every mutating operation persists the full list before returning.
/// Persistence failures are logged and swallowed: the in-memory list stays
/// authoritative for the rest of the session and the next successful
/// mutation writes everything out again.
pub struct TaskStore {
    ctx: SharedContext,
    tasks: Vec<Task>,
    next_id: i64,
}

impl TaskStore {
    /// Loads the persisted list. Missing or malformed data falls back to an
    /// empty list; a parse error is never propagated to the caller.
    pub fn load(ctx: SharedContext) -> Self {
        let tasks = match LocalStorage::load(ctx.as_ref()) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::warn!("Could not read task file, starting empty: {}", e);
                vec![]
            }
        };
        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            ctx,
            tasks,
            next_id: max_id + 1,
        }
    }

    /// Ids are wall-clock millis, bumped past any existing id so that two
    /// creations inside the same clock tick still get distinct values.
    fn allocate_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.next_id);
        self.next_id = id + 1;
        id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Appends a new task. The title is trimmed and must be non-empty;
    /// otherwise nothing is added and nothing is persisted.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let task = Task {
            id: self.allocate_id(),
            title: title.to_string(),
            description: description.trim().to_string(),
            due_date,
            completed: false,
        };
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Flips the completed flag. Unknown ids are a silent no-op.
    pub fn toggle_complete(&mut self, id: i64) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            self.persist();
        }
    }

    /// Overwrites title/description/due date in place. An empty trimmed
    /// title leaves the task unchanged; an unknown id is a no-op.
    pub fn update(
        &mut self,
        id: i64,
        title: &str,
        description: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = title.to_string();
            task.description = description.trim().to_string();
            task.due_date = due_date;
            self.persist();
        }
        Ok(())
    }

    /// Removes the task with the matching id, preserving the order of the
    /// remaining tasks. Unknown ids are a silent no-op.
    pub fn delete(&mut self, id: i64) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Writes the full list to disk. Failures are logged, not raised.
    pub fn persist(&self) {
        if let Err(e) = LocalStorage::save(self.ctx.as_ref(), &self.tasks) {
            log::warn!("Could not persist tasks (keeping in-memory state): {}", e);
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Percentage of completed tasks, rounded to the nearest integer.
    /// An empty list is 0, not a division by zero.
    pub fn progress_percent(&self) -> u16 {
        if self.tasks.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.tasks.len() as f64;
        (ratio * 100.0).round() as u16
    }
}
