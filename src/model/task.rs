use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Task lifecycle state. Stored on disk as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TaskStatus {
    NotDone,
    Done,
    Overdue,
}

impl TaskStatus {
    /// Integer code written to the data file
    pub fn code(self) -> u8 {
        match self {
            TaskStatus::NotDone => 0,
            TaskStatus::Done => 1,
            TaskStatus::Overdue => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<TaskStatus> {
        match code {
            0 => Some(TaskStatus::NotDone),
            1 => Some(TaskStatus::Done),
            2 => Some(TaskStatus::Overdue),
            _ => None,
        }
    }

    /// Label shown in the table and matched by keyword search
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::NotDone => "Belum Selesai",
            TaskStatus::Done => "Selesai",
            TaskStatus::Overdue => "Terlambat",
        }
    }

    /// Stable machine name for JSON output
    pub fn name(self) -> &'static str {
        match self {
            TaskStatus::NotDone => "not_done",
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> u8 {
        status.code()
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TaskStatus::from_code(code).ok_or_else(|| format!("unknown status code: {}", code))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single to-do item. Field order here is the order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub task: String,
    pub category: String,
    pub priority: i64,
    pub status: TaskStatus,
    pub description: String,
    /// `YYYY-MM-DD HH:MM:SS`, set once on creation
    pub created_at: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub due_date: String,
}

/// How a field's values compare when sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Timestamp,
}

/// The fields of a task, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Id,
    Task,
    Category,
    Priority,
    Status,
    Description,
    CreatedAt,
    DueDate,
}

impl TaskField {
    pub const ALL: [TaskField; 8] = [
        TaskField::Id,
        TaskField::Task,
        TaskField::Category,
        TaskField::Priority,
        TaskField::Status,
        TaskField::Description,
        TaskField::CreatedAt,
        TaskField::DueDate,
    ];

    /// The field's key in the data file
    pub fn name(self) -> &'static str {
        match self {
            TaskField::Id => "id",
            TaskField::Task => "task",
            TaskField::Category => "category",
            TaskField::Priority => "priority",
            TaskField::Status => "status",
            TaskField::Description => "description",
            TaskField::CreatedAt => "created_at",
            TaskField::DueDate => "due_date",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            TaskField::Id | TaskField::Priority | TaskField::Status => FieldKind::Integer,
            TaskField::Task | TaskField::Category | TaskField::Description => FieldKind::Text,
            TaskField::CreatedAt | TaskField::DueDate => FieldKind::Timestamp,
        }
    }

    /// Look up a field by its 1-based position in [`TaskField::ALL`]
    pub fn from_index(index: usize) -> Option<TaskField> {
        index
            .checked_sub(1)
            .and_then(|i| TaskField::ALL.get(i))
            .copied()
    }

    /// String form of this field's value, with status shown by label
    pub fn display_value(self, task: &Task) -> String {
        match self {
            TaskField::Id => task.id.to_string(),
            TaskField::Task => task.task.clone(),
            TaskField::Category => task.category.clone(),
            TaskField::Priority => task.priority.to_string(),
            TaskField::Status => task.status.label().to_string(),
            TaskField::Description => task.description.clone(),
            TaskField::CreatedAt => task.created_at.clone(),
            TaskField::DueDate => task.due_date.clone(),
        }
    }

    /// Integer value for integer-kind fields
    pub fn integer_value(self, task: &Task) -> Option<i64> {
        match self {
            TaskField::Id => i64::try_from(task.id).ok(),
            TaskField::Priority => Some(task.priority),
            TaskField::Status => Some(i64::from(task.status.code())),
            _ => None,
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        TaskField::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = TaskField::ALL.iter().map(|f| f.name()).collect();
                format!("unknown field '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}
