use chrono::NaiveDateTime;

use crate::model::store::TaskStore;
use crate::model::task::TaskStatus;
use crate::ops::date::is_overdue;

/// Promote every NotDone task past its due date to Overdue.
/// Returns how many tasks changed. Running it again with the same `now`
/// changes nothing.
pub fn sweep(store: &mut TaskStore, now: &NaiveDateTime) -> usize {
    let mut changed = 0;
    for task in store.tasks.iter_mut() {
        if task.status == TaskStatus::NotDone && is_overdue(task, now) {
            task.status = TaskStatus::Overdue;
            changed += 1;
        }
    }
    changed
}
