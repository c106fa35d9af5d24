use super::task::Task;

/// The in-memory task collection, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    pub tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    /// Next id to assign: one past the highest id, or 0 when empty.
    /// `None` once the highest id is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}
