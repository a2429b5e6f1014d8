use chrono::{Local, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::storage::Storage;
use crate::task::{Priority, Task};

/// Storage key for the serialized task list. The version suffix guards
/// against silently misreading data after a future schema change.
pub const STORAGE_KEY: &str = "todo_tasks_v1";

/// Owner of the authoritative task list. Every mutation is written back to
/// storage before it returns, so the store is never out of sync with its
/// persisted copy.
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateError {
    #[error("task text is empty")]
    EmptyText,
}

/// Why a persisted task list was discarded. Never surfaced past
/// [`TaskStore::load`]; exists so the recovery path is a named, testable
/// thing instead of a catch-all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no persisted task list")]
    Missing,
    #[error("persisted task list is not valid JSON: {0}")]
    Syntax(String),
    #[error("persisted task list is not an array")]
    NotAnArray,
}

/// Decode a persisted task list. Absent, corrupt, or non-array data is
/// classified rather than silently swallowed; callers substitute an empty
/// list on any error.
pub fn decode_tasks(raw: Option<&str>) -> Result<Vec<Task>, DecodeError> {
    let raw = raw.ok_or(DecodeError::Missing)?;
    let value: Value =
        serde_json::from_str(raw).map_err(|err| DecodeError::Syntax(err.to_string()))?;
    if !value.is_array() {
        return Err(DecodeError::NotAnArray);
    }
    serde_json::from_value(value).map_err(|err| DecodeError::Syntax(err.to_string()))
}

impl<S: Storage> TaskStore<S> {
    /// Empty store; does not read existing persisted state.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
        }
    }

    /// Restore the task list from storage. Anything unreadable degrades to
    /// an empty list; the caller never sees an error.
    pub fn load(storage: S) -> Self {
        let tasks = match decode_tasks(storage.get(STORAGE_KEY).as_deref()) {
            Ok(tasks) => tasks,
            Err(DecodeError::Missing) => Vec::new(),
            Err(err) => {
                warn!("discarding persisted task list: {err}");
                Vec::new()
            }
        };
        Self { storage, tasks }
    }

    /// Current tasks, insertion order. This is also the display order
    /// within a tab.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Add a task. The text is trimmed; blank text is rejected and the
    /// list is left untouched. A missing due date defaults to the start
    /// date (today).
    pub fn create(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: Option<&str>,
    ) -> Result<Task, CreateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CreateError::EmptyText);
        }

        let start_date = Local::now().format("%Y-%m-%d").to_string();
        let due_date = match due_date {
            Some(d) => d.to_string(),
            None => start_date.clone(),
        };
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            priority,
            start_date,
            due_date: Some(due_date),
            done: false,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Set `done` on the task with the given id. Unknown ids are a no-op;
    /// stale references from the front-end must not crash anything.
    pub fn toggle_done(&mut self, id: i64, value: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.done = value;
        }
        self.persist();
    }

    /// Remove the task with the given id. Unknown ids are a no-op.
    pub fn delete_by_id(&mut self, id: i64) {
        self.tasks.retain(|t| t.id != id);
        self.persist();
    }

    /// Empty the list unconditionally. Asking the user first is the
    /// front-end's job.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    /// Millisecond timestamp, bumped past the current maximum so ids stay
    /// unique even when two tasks land in the same millisecond.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if now <= max => max + 1,
            _ => now,
        }
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.tasks) {
            Ok(json) => {
                if let Err(err) = self.storage.set(STORAGE_KEY, &json) {
                    warn!("failed to persist task list: {err}");
                }
            }
            Err(err) => warn!("failed to encode task list: {err}"),
        }
    }
}
