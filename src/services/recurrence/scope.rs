// Scope resolution for series edits and deletes.
//
// Pure selection over the loaded task list; callers apply the resulting
// ids against the record store.

use crate::models::task::{Task, TaskId};

/// Breadth of a mutation on a recurring task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditScope {
    /// Only the target task.
    Single,
    /// The target plus siblings starting strictly later; earlier repeats
    /// always stay.
    Following,
    /// Every task sharing the repeat id.
    All,
}

/// Resolve which task ids a scoped mutation applies to.
///
/// A target outside any series resolves to itself alone, whatever scope
/// was asked for; the scope prompt only exists for series members. The
/// target itself is always part of the result, even when the loaded list
/// does not contain it. Ids come back ordered by start date.
pub fn resolve(tasks: &[Task], target: &Task, scope: EditScope) -> Vec<TaskId> {
    let Some(repeat_id) = target.repeat_id else {
        return vec![target.id];
    };
    if scope == EditScope::Single {
        return vec![target.id];
    }

    let mut members: Vec<(chrono::NaiveDate, TaskId)> = tasks
        .iter()
        .filter(|task| task.repeat_id == Some(repeat_id) && task.id != target.id)
        .filter(|task| match scope {
            EditScope::Following => task.start_date > target.start_date,
            _ => true,
        })
        .map(|task| (task.start_date, task.id))
        .collect();
    members.push((target.start_date, target.id));
    members.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    members.into_iter().map(|(_, id)| id).collect()
}
