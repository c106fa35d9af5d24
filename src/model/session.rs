use super::task::{Task, TaskField};
use crate::ops::search;

/// Errors from the search/sort setters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("keyword must not be empty")]
    EmptyKeyword,
    #[error("choice must not be empty")]
    EmptyChoice,
    #[error("invalid choice: {0}")]
    InvalidChoice(String),
    #[error("answer must be y or n")]
    InvalidYesNo,
}

/// Transient view state: active search and sort. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub search_keyword: Option<String>,
    pub sort_field: Option<TaskField>,
    pub sort_ascending: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            search_keyword: None,
            sort_field: None,
            sort_ascending: true,
        }
    }
}

impl SessionState {
    pub fn set_keyword(&mut self, keyword: &str) -> Result<(), SessionError> {
        if keyword.trim().is_empty() {
            return Err(SessionError::EmptyKeyword);
        }
        self.search_keyword = Some(keyword.to_string());
        Ok(())
    }

    /// Set the sort from raw menu input: a 1-based field number and a y/n answer.
    pub fn set_sort(&mut self, field_index: &str, ascending: &str) -> Result<(), SessionError> {
        let field_index = field_index.trim();
        if field_index.is_empty() {
            return Err(SessionError::EmptyChoice);
        }
        let field = field_index
            .parse::<usize>()
            .ok()
            .and_then(TaskField::from_index)
            .ok_or_else(|| SessionError::InvalidChoice(field_index.to_string()))?;

        let ascending = parse_yes_no(ascending)?;
        self.set_sort_field(field, ascending);
        Ok(())
    }

    pub fn set_sort_field(&mut self, field: TaskField, ascending: bool) {
        self.sort_field = Some(field);
        self.sort_ascending = ascending;
    }

    pub fn reset(&mut self) {
        *self = SessionState::default();
    }

    /// The tasks to display: keyword filter first, then sort.
    pub fn view<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut out: Vec<&Task> = match &self.search_keyword {
            Some(keyword) => search::filter_by_keyword(tasks, keyword),
            None => tasks.iter().collect(),
        };
        if let Some(field) = self.sort_field {
            search::sort_tasks(&mut out, field, self.sort_ascending);
        }
        out
    }
}

fn parse_yes_no(answer: &str) -> Result<bool, SessionError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(SessionError::EmptyChoice);
    }
    match answer.to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(SessionError::InvalidYesNo),
    }
}

/// Single-slot pending error message. A newer message replaces an unshown one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSignal {
    message: Option<String>,
}

impl ErrorSignal {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Return the pending message and clear the slot
    pub fn take(&mut self) -> Option<String> {
        self.message.take()
    }
}
