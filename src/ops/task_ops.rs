use chrono::NaiveDateTime;

use crate::model::store::TaskStore;
use crate::model::task::{Task, TaskStatus};
use crate::ops::date::{format_timestamp, parse_timestamp};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("invalid date format: please enter the date as 'YYYY-MM-DD HH:MM:SS'")]
    InvalidDateFormat,
    #[error("priority must be a number")]
    InvalidPriority,
    #[error("due date must be later than the current time")]
    DueDateNotInFuture,
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("task {0} is already done")]
    AlreadyDone(u64),
    #[error("task {0} is already overdue")]
    AlreadyOverdue(u64),
    #[error("no task id left to assign: the highest id is already in use")]
    IdsExhausted,
}

/// Raw user input for a new task. Priority and due date are validated by
/// [`add_task`].
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub task: String,
    pub category: String,
    pub priority: String,
    pub description: String,
    pub due_date: String,
}

/// Task counts for the header line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub done: usize,
    /// Everything not done, overdue included
    pub not_done: usize,
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Validate a draft and append it to the store. Returns the assigned id.
/// Nothing is changed when validation fails.
pub fn add_task(
    store: &mut TaskStore,
    draft: TaskDraft,
    now: NaiveDateTime,
) -> Result<u64, TaskError> {
    let due = parse_timestamp(&draft.due_date).map_err(|_| TaskError::InvalidDateFormat)?;
    let priority = draft
        .priority
        .trim()
        .parse::<i64>()
        .map_err(|_| TaskError::InvalidPriority)?;
    if now >= due {
        return Err(TaskError::DueDateNotInFuture);
    }

    let id = store.next_id().ok_or(TaskError::IdsExhausted)?;
    store.tasks.push(Task {
        id,
        task: draft.task,
        category: draft.category,
        priority,
        status: TaskStatus::NotDone,
        description: draft.description,
        created_at: format_timestamp(&now),
        due_date: draft.due_date,
    });
    Ok(id)
}

/// Remove the first task with the given id and return it.
pub fn delete_task(store: &mut TaskStore, id: u64) -> Result<Task, TaskError> {
    let pos = store
        .tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;
    Ok(store.tasks.remove(pos))
}

/// NotDone → Done. Done and Overdue are terminal.
pub fn mark_done(store: &mut TaskStore, id: u64) -> Result<(), TaskError> {
    let task = store.find_mut(id).ok_or(TaskError::NotFound(id))?;
    match task.status {
        TaskStatus::Done => Err(TaskError::AlreadyDone(id)),
        TaskStatus::Overdue => Err(TaskError::AlreadyOverdue(id)),
        TaskStatus::NotDone => {
            task.status = TaskStatus::Done;
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

pub fn summary(store: &TaskStore) -> Summary {
    let total = store.len();
    let done = store
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .count();
    Summary {
        total,
        done,
        not_done: total - done,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
