use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime, Timelike};
use regex::Regex;

use crate::model::task::{Task, TaskStatus};

/// chrono format string for task timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable form of [`TIMESTAMP_FORMAT`], for prompts and messages
pub const TIMESTAMP_HINT: &str = "YYYY-MM-DD HH:MM:SS";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("invalid date '{0}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidFormat(String),
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp. The shape must match exactly
/// and the values must form a real calendar date and time.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, DateError> {
    let invalid = || DateError::InvalidFormat(text.to_string());
    if !TIMESTAMP_RE.is_match(text) {
        return Err(invalid());
    }
    let parsed = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    // chrono accepts :60 as a leap second
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(parsed)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// A task is overdue when it is not done and `now` is strictly past its
/// due date. A due date that does not parse is never overdue.
pub fn is_overdue(task: &Task, now: &NaiveDateTime) -> bool {
    if task.status == TaskStatus::Done {
        return false;
    }
    match parse_timestamp(&task.due_date) {
        Ok(due) => *now > due,
        Err(_) => false,
    }
}
