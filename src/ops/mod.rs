pub mod date;
pub mod overdue;
pub mod search;
pub mod task_ops;
