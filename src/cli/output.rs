use serde::Serialize;

use crate::model::task::Task;
use crate::ops::task_ops::Summary;
use crate::util::unicode::{center_to_width, pad_to_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub task: String,
    pub category: String,
    pub priority: i64,
    pub status: &'static str,
    pub status_label: &'static str,
    pub description: String,
    pub created_at: String,
    pub due_date: String,
}

#[derive(Serialize)]
pub struct SummaryJson {
    pub total: usize,
    pub done: usize,
    pub not_done: usize,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        task: task.task.clone(),
        category: task.category.clone(),
        priority: task.priority,
        status: task.status.name(),
        status_label: task.status.label(),
        description: task.description.clone(),
        created_at: task.created_at.clone(),
        due_date: task.due_date.clone(),
    }
}

pub fn summary_to_json(summary: &Summary) -> SummaryJson {
    SummaryJson {
        total: summary.total,
        done: summary.done,
        not_done: summary.not_done,
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// A table column: header text and content width in cells
struct Column {
    header: &'static str,
    width: usize,
    value: fn(&Task) -> String,
}

const COLUMNS: [Column; 8] = [
    Column {
        header: "ID",
        width: 3,
        value: |t| t.id.to_string(),
    },
    Column {
        header: "Task",
        width: 20,
        value: |t| t.task.clone(),
    },
    Column {
        header: "Description",
        width: 50,
        value: |t| t.description.clone(),
    },
    Column {
        header: "Category",
        width: 10,
        value: |t| t.category.clone(),
    },
    Column {
        header: "Priority",
        width: 9,
        value: |t| t.priority.to_string(),
    },
    Column {
        header: "Status",
        width: 14,
        value: |t| t.status.label().to_string(),
    },
    Column {
        header: "Due Date",
        width: 20,
        value: |t| t.due_date.clone(),
    },
    Column {
        header: "Created At",
        width: 20,
        value: |t| t.created_at.clone(),
    },
];

pub const EMPTY_PLACEHOLDER: &str = "Empty Data";

fn separator() -> String {
    let mut line = String::new();
    for col in &COLUMNS {
        line.push('+');
        line.push_str(&"-".repeat(col.width + 2));
    }
    line.push('+');
    line
}

fn row(cells: impl Iterator<Item = (usize, String)>) -> String {
    let mut line = String::new();
    for (width, value) in cells {
        line.push_str("| ");
        line.push_str(&pad_to_width(&truncate_to_width(&value, width), width));
        line.push(' ');
    }
    line.push('|');
    line
}

/// Render tasks as a bordered fixed-width table. Over-long values are cut
/// to fit; an empty list gets a placeholder row.
pub fn format_task_table(tasks: &[&Task]) -> Vec<String> {
    let sep = separator();
    let mut lines = vec![
        sep.clone(),
        row(COLUMNS.iter().map(|c| (c.width, c.header.to_string()))),
        sep.clone(),
    ];

    if tasks.is_empty() {
        // same outer width as the separator, minus "| " and " |"
        let inner = sep.chars().count() - 4;
        lines.push(format!("| {} |", center_to_width(EMPTY_PLACEHOLDER, inner)));
    } else {
        for task in tasks {
            lines.push(row(COLUMNS.iter().map(|c| (c.width, (c.value)(task)))));
        }
    }

    lines.push(sep);
    lines
}

pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Total tasks: {}  |  Done: {}  |  Not done: {}",
        summary.total, summary.done, summary.not_done
    )
}

/// One line per task, for short listings such as a priority search
pub fn format_task_line(task: &Task) -> String {
    format!("ID: {} - {}", task.id, task.task)
}
