//! The task tracker as one owned value: the store, its backing file, and the
//! per-run view state. Every mutation is followed by a save.

use chrono::NaiveDateTime;

use crate::io::store_io::{StoreError, TaskFile};
use crate::model::session::{ErrorSignal, SessionState};
use crate::model::store::TaskStore;
use crate::model::task::Task;
use crate::ops::overdue;
use crate::ops::search;
use crate::ops::task_ops::{self, Summary, TaskDraft, TaskError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Task(#[from] TaskError),
    /// The in-memory change stands; only the save failed
    #[error("change kept in memory but not saved: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct App {
    pub store: TaskStore,
    pub file: TaskFile,
    pub session: SessionState,
    pub error: ErrorSignal,
}

impl App {
    /// Load the store from `file`.
    pub fn open(file: TaskFile) -> Self {
        let store = TaskStore::new(file.load());
        App {
            store,
            file,
            session: SessionState::default(),
            error: ErrorSignal::default(),
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.file.save(&self.store.tasks)
    }

    /// Mark past-due tasks overdue, saving when anything changed.
    /// Returns the number of tasks promoted.
    pub fn refresh(&mut self, now: &NaiveDateTime) -> Result<usize, StoreError> {
        let changed = overdue::sweep(&mut self.store, now);
        if changed > 0 {
            self.save()?;
        }
        Ok(changed)
    }

    pub fn add(&mut self, draft: TaskDraft, now: NaiveDateTime) -> Result<u64, AppError> {
        let id = task_ops::add_task(&mut self.store, draft, now)?;
        self.save()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: u64) -> Result<Task, AppError> {
        let removed = task_ops::delete_task(&mut self.store, id)?;
        self.file.log_deletion(&removed);
        self.save()?;
        Ok(removed)
    }

    pub fn complete(&mut self, id: u64) -> Result<(), AppError> {
        task_ops::mark_done(&mut self.store, id)?;
        self.save()?;
        Ok(())
    }

    /// Tasks as the session currently wants them shown
    pub fn visible(&self) -> Vec<&Task> {
        self.session.view(&self.store.tasks)
    }

    pub fn by_priority(&self, priority: i64) -> Vec<&Task> {
        search::filter_by_priority(&self.store.tasks, priority)
    }

    pub fn summary(&self) -> Summary {
        task_ops::summary(&self.store)
    }
}
