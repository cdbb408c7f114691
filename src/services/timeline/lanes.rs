use chrono::NaiveDate;

use crate::models::task::{Task, TaskId};

/// Lane index assigned to one task within a grouping row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssignment {
    pub task_id: TaskId,
    pub lane: usize,
}

/// Result of packing one grouping row.
///
/// Assignments are ordered by `(start_date, end_date, task_id)`, the same
/// total order the packer walks, so equal inputs always produce equal plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanePlan {
    pub assignments: Vec<LaneAssignment>,
    pub lane_count: usize,
}

impl LanePlan {
    pub fn lane_for(&self, task_id: TaskId) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.task_id == task_id)
            .map(|a| a.lane)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Pack tasks of one grouping row into non-overlapping lanes.
///
/// Greedy first-fit over tasks sorted by start date: each task takes the
/// lowest lane whose previous occupant ended strictly before the task
/// starts, or opens a new lane. Ranges are inclusive, so a lane ending on
/// day X is free again only from X + 1. First-fit over this order uses the
/// minimum possible number of lanes for the row.
pub fn pack(tasks: &[Task]) -> LanePlan {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by(|left, right| {
        left.start_date
            .cmp(&right.start_date)
            .then_with(|| left.end_date.cmp(&right.end_date))
            .then_with(|| left.id.cmp(&right.id))
    });

    let mut lane_ends = Vec::<NaiveDate>::new();
    let mut assignments = Vec::with_capacity(ordered.len());
    for task in ordered {
        let lane = lane_ends
            .iter()
            .position(|lane_end| *lane_end < task.start_date)
            .unwrap_or_else(|| {
                lane_ends.push(task.start_date);
                lane_ends.len() - 1
            });
        lane_ends[lane] = task.end_date;
        assignments.push(LaneAssignment {
            task_id: task.id,
            lane,
        });
    }

    LanePlan {
        assignments,
        lane_count: lane_ends.len(),
    }
}
