// Drag session state machine.
//
// idle -> dragging -> released. A release either yields one date write,
// reports a tap (the pointer never left its day column), or the session is
// cancelled and the stored dates stay untouched. Intermediate pointer
// positions only feed the visual preview.

use chrono::NaiveDate;

use crate::models::settings::PlannerSettings;
use crate::models::task::{Task, TaskId};

use super::{days_delta, translate, DragMode};

/// Context for an active drag operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragContext {
    pub task_id: TaskId,
    pub mode: DragMode,
    pub origin_start: NaiveDate,
    pub origin_end: NaiveDate,
    /// Total pointer travel since the press, in pixels.
    pub pointer_px: f32,
}

impl DragContext {
    pub fn from_task(task: &Task, mode: DragMode) -> Self {
        Self {
            task_id: task.id,
            mode,
            origin_start: task.start_date,
            origin_end: task.end_date,
            pointer_px: 0.0,
        }
    }
}

/// Date write produced by releasing a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragCommit {
    pub task_id: TaskId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// What a pointer release resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRelease {
    /// The bar landed on new dates; write them.
    Commit(DragCommit),
    /// Zero-day release; the client opens the task instead of writing.
    Tap(TaskId),
    /// The pointer moved but clamping landed back on the original dates;
    /// nothing to write and nothing to open.
    Unchanged(TaskId),
}

/// Tracks at most one in-flight drag and its snapped preview.
///
/// The persisted dates are only ever written from the commit a release
/// returns; if that write fails the caller reverts to the origin dates
/// carried in the commit's task.
pub struct DragSession {
    day_column_px: f32,
    snap_threshold: f32,
    context: Option<DragContext>,
}

impl DragSession {
    pub fn new(settings: &PlannerSettings) -> Self {
        Self {
            day_column_px: settings.day_column_px,
            snap_threshold: settings.snap_threshold,
            context: None,
        }
    }

    /// Begin dragging a task, replacing any drag already in flight.
    pub fn begin(&mut self, task: &Task, mode: DragMode) {
        log::debug!("Drag begin: task {} mode {:?}", task.id, mode);
        self.context = Some(DragContext::from_task(task, mode));
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.context.as_ref()
    }

    pub fn is_dragging(&self, task_id: TaskId) -> bool {
        self.context.map_or(false, |c| c.task_id == task_id)
    }

    /// Record the pointer's total travel since the press. Ignored when idle.
    pub fn update_pointer(&mut self, delta_px: f32) {
        if let Some(context) = self.context.as_mut() {
            context.pointer_px = delta_px;
        }
    }

    /// Snapped day delta of the current pointer position.
    pub fn days(&self) -> i64 {
        self.context.map_or(0, |c| {
            days_delta(c.pointer_px, self.day_column_px, self.snap_threshold)
        })
    }

    /// Dates the bar would land on if released now, for preview rendering.
    pub fn preview(&self) -> Option<(NaiveDate, NaiveDate)> {
        let context = self.context?;
        Some(translate(
            context.origin_start,
            context.origin_end,
            context.mode,
            self.days(),
        ))
    }

    /// Release the pointer and resolve the drag. Returns `None` when idle.
    pub fn finish(&mut self) -> Option<DragRelease> {
        let days = self.days();
        let context = self.context.take()?;
        let (start_date, end_date) = translate(
            context.origin_start,
            context.origin_end,
            context.mode,
            days,
        );

        let release = if days == 0 {
            DragRelease::Tap(context.task_id)
        } else if start_date == context.origin_start && end_date == context.origin_end {
            DragRelease::Unchanged(context.task_id)
        } else {
            DragRelease::Commit(DragCommit {
                task_id: context.task_id,
                start_date,
                end_date,
            })
        };
        log::debug!("Drag finish: task {} -> {:?}", context.task_id, release);
        Some(release)
    }

    /// Abort the drag (escape key, drop outside a valid target).
    pub fn cancel(&mut self) {
        if let Some(context) = self.context.take() {
            log::debug!("Drag cancelled: task {}", context.task_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn settings() -> PlannerSettings {
        PlannerSettings {
            day_column_px: 10.0,
            snap_threshold: 0.5,
            ..PlannerSettings::default()
        }
    }

    fn sample_task() -> Task {
        Task::new("Draggable", ymd(2025, 3, 3), ymd(2025, 3, 5)).unwrap()
    }

    #[test]
    fn test_idle_session_does_nothing() {
        let mut session = DragSession::new(&settings());
        assert!(session.active().is_none());
        assert_eq!(session.preview(), None);
        session.update_pointer(50.0);
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn test_move_commit_flow() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::Move);
        assert!(session.is_dragging(task.id));

        session.update_pointer(42.0);
        assert_eq!(session.days(), 4);
        assert_eq!(
            session.preview(),
            Some((ymd(2025, 3, 7), ymd(2025, 3, 9)))
        );

        let release = session.finish().unwrap();
        assert_eq!(
            release,
            DragRelease::Commit(DragCommit {
                task_id: task.id,
                start_date: ymd(2025, 3, 7),
                end_date: ymd(2025, 3, 9),
            })
        );
        assert!(session.active().is_none());
    }

    #[test]
    fn test_zero_delta_release_is_a_tap() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::Move);
        session.update_pointer(3.0);
        assert_eq!(session.finish(), Some(DragRelease::Tap(task.id)));
    }

    #[test]
    fn test_clamped_release_is_unchanged() {
        let task = Task::new("Single", ymd(2025, 3, 3), ymd(2025, 3, 3)).unwrap();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::ResizeLeft);
        session.update_pointer(80.0);
        assert_eq!(session.finish(), Some(DragRelease::Unchanged(task.id)));
    }

    #[test]
    fn test_runaway_pointer_commits_at_the_gesture_limit() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::Move);
        session.update_pointer(f32::MAX);
        assert_eq!(session.days(), super::super::MAX_DRAG_DAYS);

        let Some(DragRelease::Commit(commit)) = session.finish() else {
            panic!("expected a commit");
        };
        assert_eq!(
            (commit.end_date - commit.start_date).num_days(),
            (task.end_date - task.start_date).num_days()
        );
    }

    #[test]
    fn test_cancel_discards_the_drag() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::ResizeRight);
        session.update_pointer(100.0);
        session.cancel();

        assert!(session.active().is_none());
        assert_eq!(session.finish(), None);
    }

    #[test]
    fn test_begin_replaces_active_drag() {
        let first = sample_task();
        let second = Task::new("Other", ymd(2025, 4, 1), ymd(2025, 4, 2)).unwrap();
        let mut session = DragSession::new(&settings());

        session.begin(&first, DragMode::Move);
        session.update_pointer(40.0);
        session.begin(&second, DragMode::Move);

        assert!(session.is_dragging(second.id));
        assert!(!session.is_dragging(first.id));
        // The replacement starts from a fresh pointer origin.
        assert_eq!(session.days(), 0);
    }

    #[test]
    fn test_pointer_updates_are_absolute_not_cumulative() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::Move);
        session.update_pointer(25.0);
        session.update_pointer(12.0);
        assert_eq!(session.days(), 1);
    }

    #[test]
    fn test_resize_preview_tracks_pointer() {
        let task = sample_task();
        let mut session = DragSession::new(&settings());

        session.begin(&task, DragMode::ResizeRight);
        session.update_pointer(31.0);
        assert_eq!(
            session.preview(),
            Some((ymd(2025, 3, 3), ymd(2025, 3, 8)))
        );

        session.update_pointer(-31.0);
        assert_eq!(
            session.preview(),
            Some((ymd(2025, 3, 3), ymd(2025, 3, 3)))
        );
    }
}
