use chrono::NaiveDate;

use crate::models::settings::PlannerSettings;
use crate::models::task::{Task, TaskId};
use crate::utils::date::{days_between, span_days};

use super::grouping::{self, GroupKey};
use super::lanes;
use super::DateWindow;

/// Pixel rectangle of one task bar, relative to the window's left edge.
///
/// Vertical placement is `lane` (the renderer picks a lane height); the
/// clipped flags mark bars that continue past the window and are drawn
/// with an open edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskBar {
    pub task_id: TaskId,
    pub lane: usize,
    pub x: f32,
    pub width: f32,
    pub clipped_start: bool,
    pub clipped_end: bool,
}

/// One rendered grouping row: its lane stack and bars.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub key: GroupKey,
    pub lane_count: usize,
    pub bars: Vec<TaskBar>,
}

/// Full layout of the visible window, recomputed from the task snapshot
/// whenever the snapshot, window, or grouping changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub window: DateWindow,
    pub day_column_px: f32,
    pub groups: Vec<GroupLayout>,
}

impl TimelineLayout {
    /// Sum of lane counts across all rows, the rendered height in lanes.
    pub fn total_lanes(&self) -> usize {
        self.groups.iter().map(|g| g.lane_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Pixel x of a day column's left edge within the window.
pub fn day_x(window: DateWindow, date: NaiveDate, day_column_px: f32) -> f32 {
    days_between(window.start, date) as f32 * day_column_px
}

/// Lay out every visible task: window filter, grouping, lane packing,
/// then day-to-pixel mapping.
pub fn layout(tasks: &[Task], window: DateWindow, settings: &PlannerSettings) -> TimelineLayout {
    let visible = grouping::in_window(tasks, window);
    let groups = grouping::group_tasks(&visible, settings.group_by);

    let mut laid_out = Vec::with_capacity(groups.len());
    for group in &groups {
        let plan = lanes::pack(&group.tasks);
        let bars = plan
            .assignments
            .iter()
            .filter_map(|assignment| {
                let task = group.tasks.iter().find(|t| t.id == assignment.task_id)?;
                Some(bar_for(task, assignment.lane, window, settings.day_column_px))
            })
            .collect();
        laid_out.push(GroupLayout {
            key: group.key,
            lane_count: plan.lane_count,
            bars,
        });
    }

    let layout = TimelineLayout {
        window,
        day_column_px: settings.day_column_px,
        groups: laid_out,
    };
    log::debug!(
        "Laid out {} tasks into {} rows / {} lanes for {} to {}",
        visible.len(),
        layout.groups.len(),
        layout.total_lanes(),
        window.start,
        window.end
    );
    layout
}

fn bar_for(task: &Task, lane: usize, window: DateWindow, day_column_px: f32) -> TaskBar {
    let visible_start = task.start_date.max(window.start);
    let visible_end = task.end_date.min(window.end);
    TaskBar {
        task_id: task.id,
        lane,
        x: day_x(window, visible_start, day_column_px),
        width: span_days(visible_start, visible_end) as f32 * day_column_px,
        clipped_start: task.start_date < window.start,
        clipped_end: task.end_date > window.end,
    }
}
