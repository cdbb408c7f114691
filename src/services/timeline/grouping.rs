use std::collections::BTreeMap;
use std::fmt;

use crate::models::settings::GroupBy;
use crate::models::task::{MemberId, ProjectId, Task};

use super::DateWindow;

/// Key of one grouping row on the timeline.
///
/// Ordering puts the catch-all rows after the keyed ones, which is the
/// order rows are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Member(MemberId),
    Unassigned,
    Project(ProjectId),
    NoProject,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Member(id) => write!(f, "member {}", id),
            GroupKey::Unassigned => write!(f, "unassigned"),
            GroupKey::Project(id) => write!(f, "project {}", id),
            GroupKey::NoProject => write!(f, "no project"),
        }
    }
}

/// One grouping row and the tasks that landed in it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGroup {
    pub key: GroupKey,
    pub tasks: Vec<Task>,
}

/// Keep only tasks that touch the window.
pub fn in_window(tasks: &[Task], window: DateWindow) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.overlaps_window(window.start, window.end))
        .cloned()
        .collect()
}

/// Split tasks into grouping rows.
///
/// Grouping by member duplicates a task into the row of every assignee;
/// tasks with no assignee land in the unassigned row. Grouping by project
/// places each task exactly once. Rows come back in `GroupKey` order.
pub fn group_tasks(tasks: &[Task], group_by: GroupBy) -> Vec<TimelineGroup> {
    let mut rows: BTreeMap<GroupKey, Vec<Task>> = BTreeMap::new();

    for task in tasks {
        match group_by {
            GroupBy::Member => {
                if task.assignee_ids.is_empty() {
                    rows.entry(GroupKey::Unassigned)
                        .or_default()
                        .push(task.clone());
                } else {
                    for member in &task.assignee_ids {
                        rows.entry(GroupKey::Member(*member))
                            .or_default()
                            .push(task.clone());
                    }
                }
            }
            GroupBy::Project => {
                let key = match task.project_id {
                    Some(project) => GroupKey::Project(project),
                    None => GroupKey::NoProject,
                };
                rows.entry(key).or_default().push(task.clone());
            }
        }
    }

    rows.into_iter()
        .map(|(key, tasks)| TimelineGroup { key, tasks })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(title: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(title, start, end).unwrap()
    }

    #[test]
    fn test_in_window_keeps_partial_overlap() {
        let tasks = vec![
            task("before", ymd(2025, 2, 1), ymd(2025, 2, 28)),
            task("straddles", ymd(2025, 2, 27), ymd(2025, 3, 2)),
            task("inside", ymd(2025, 3, 5), ymd(2025, 3, 6)),
            task("after", ymd(2025, 4, 1), ymd(2025, 4, 2)),
        ];
        let window = DateWindow::new(ymd(2025, 3, 1), ymd(2025, 3, 31)).unwrap();

        let visible = in_window(&tasks, window);
        let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["straddles", "inside"]);
    }

    #[test]
    fn test_group_by_member_duplicates_shared_tasks() {
        let alice = MemberId::new();
        let bob = MemberId::new();
        let mut shared = task("pairing", ymd(2025, 3, 3), ymd(2025, 3, 4));
        shared.assignee_ids = vec![alice, bob];
        let mut solo = task("solo", ymd(2025, 3, 5), ymd(2025, 3, 5));
        solo.assignee_ids = vec![alice];

        let groups = group_tasks(&[shared, solo], GroupBy::Member);
        assert_eq!(groups.len(), 2);

        let alice_row = groups
            .iter()
            .find(|g| g.key == GroupKey::Member(alice))
            .unwrap();
        let bob_row = groups
            .iter()
            .find(|g| g.key == GroupKey::Member(bob))
            .unwrap();
        assert_eq!(alice_row.tasks.len(), 2);
        assert_eq!(bob_row.tasks.len(), 1);
    }

    #[test]
    fn test_group_by_member_unassigned_row_comes_last() {
        let member = MemberId::new();
        let mut assigned = task("assigned", ymd(2025, 3, 3), ymd(2025, 3, 4));
        assigned.assignee_ids = vec![member];
        let unassigned = task("floating", ymd(2025, 3, 3), ymd(2025, 3, 4));

        let groups = group_tasks(&[unassigned, assigned], GroupBy::Member);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.last().unwrap().key, GroupKey::Unassigned);
    }

    #[test]
    fn test_group_by_project_places_each_task_once() {
        let project = ProjectId::new();
        let mut tracked = task("tracked", ymd(2025, 3, 3), ymd(2025, 3, 4));
        tracked.project_id = Some(project);
        let loose = task("loose", ymd(2025, 3, 3), ymd(2025, 3, 4));

        let groups = group_tasks(&[tracked.clone(), loose], GroupBy::Project);
        assert_eq!(groups.len(), 2);

        let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, 2);
        assert_eq!(groups[0].key, GroupKey::Project(project));
        assert_eq!(groups[1].key, GroupKey::NoProject);
    }

    #[test]
    fn test_group_order_is_stable_across_input_order() {
        let alice = MemberId::new();
        let bob = MemberId::new();
        let mut a = task("a", ymd(2025, 3, 3), ymd(2025, 3, 4));
        a.assignee_ids = vec![alice];
        let mut b = task("b", ymd(2025, 3, 5), ymd(2025, 3, 6));
        b.assignee_ids = vec![bob];

        let forward = group_tasks(&[a.clone(), b.clone()], GroupBy::Member);
        let backward = group_tasks(&[b, a], GroupBy::Member);
        let forward_keys: Vec<GroupKey> = forward.iter().map(|g| g.key).collect();
        let backward_keys: Vec<GroupKey> = backward.iter().map(|g| g.key).collect();
        assert_eq!(forward_keys, backward_keys);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_tasks(&[], GroupBy::Member).is_empty());
        assert!(group_tasks(&[], GroupBy::Project).is_empty());
    }
}
