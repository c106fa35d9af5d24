use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::model::task::{FieldKind, Task, TaskField};
use crate::ops::date::parse_timestamp;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Tasks with exactly this priority, in store order.
pub fn filter_by_priority(tasks: &[Task], priority: i64) -> Vec<&Task> {
    tasks.iter().filter(|t| t.priority == priority).collect()
}

/// Tasks where `keyword` occurs, case-insensitively, in any field.
/// Status is matched by its label, not its numeric code.
pub fn filter_by_keyword<'a>(tasks: &'a [Task], keyword: &str) -> Vec<&'a Task> {
    let needle = keyword.to_lowercase();
    tasks
        .iter()
        .filter(|t| matches_keyword(t, &needle))
        .collect()
}

fn matches_keyword(task: &Task, needle: &str) -> bool {
    TaskField::ALL
        .iter()
        .any(|f| f.display_value(task).to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Stable sort by one field. Descending reverses the comparison, so tasks
/// with equal keys keep their relative order either way.
pub fn sort_tasks(tasks: &mut [&Task], field: TaskField, ascending: bool) {
    tasks.sort_by(|a, b| {
        let ord = compare_field(a, b, field);
        if ascending { ord } else { ord.reverse() }
    });
}

fn compare_field(a: &Task, b: &Task, field: TaskField) -> Ordering {
    match field.kind() {
        FieldKind::Integer => field.integer_value(a).cmp(&field.integer_value(b)),
        FieldKind::Text => field
            .display_value(a)
            .to_lowercase()
            .cmp(&field.display_value(b).to_lowercase()),
        FieldKind::Timestamp => timestamp_value(a, field).cmp(&timestamp_value(b, field)),
    }
}

/// Unparseable timestamps become `None`, which orders before any date.
fn timestamp_value(task: &Task, field: TaskField) -> Option<NaiveDateTime> {
    parse_timestamp(&field.display_value(task)).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
