//! Planner service entry point.
//! Owns the record store handle and the settings, and strings the engine
//! together: snapshots the task list, lays out the visible window, commits
//! drag releases, and runs series creation and scoped mutations.

use thiserror::Error;

use crate::models::recurrence::RecurrenceRule;
use crate::models::settings::PlannerSettings;
use crate::models::task::{RepeatId, Task, TaskId, TaskPatch};
use crate::services::drag::session::{DragCommit, DragSession};
use crate::services::recurrence::{self, scope, scope::EditScope, RecurrenceError};
use crate::services::store::{RecordStore, StoreError};
use crate::services::timeline::geometry::{self, TimelineLayout};
use crate::services::timeline::DateWindow;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
    #[error("task {0} already belongs to a series")]
    AlreadyRepeating(TaskId),
    #[error("series {0} has no tasks")]
    SeriesNotFound(RepeatId),
}

/// Orchestrates the scheduling engine over one record store.
pub struct Planner<S: RecordStore> {
    store: S,
    settings: PlannerSettings,
}

impl<S: RecordStore> Planner<S> {
    pub fn new(store: S, settings: PlannerSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// A drag session wired to this planner's geometry settings.
    pub fn drag_session(&self) -> DragSession {
        DragSession::new(&self.settings)
    }

    /// Latest task snapshot from the store, ordered by start date.
    pub fn snapshot(&self) -> Result<Vec<Task>, PlannerError> {
        Ok(self.store.list_tasks()?)
    }

    /// Lay out the visible window from the latest snapshot.
    pub fn layout(&self, window: DateWindow) -> Result<TimelineLayout, PlannerError> {
        let tasks = self.store.list_tasks()?;
        Ok(geometry::layout(&tasks, window, &self.settings))
    }

    /// Insert a single task.
    pub fn create_task(&mut self, task: Task) -> Result<Task, PlannerError> {
        let mut inserted = self.store.insert_tasks(vec![task])?;
        inserted
            .pop()
            .ok_or_else(|| StoreError::Backend("insert returned an empty batch".to_string()).into())
    }

    /// Create a seed task and its recurring siblings in one atomic batch.
    pub fn create_series(
        &mut self,
        mut seed: Task,
        rule: &RecurrenceRule,
    ) -> Result<Vec<Task>, PlannerError> {
        let repeat_id = RepeatId::new();
        seed.repeat_id = Some(repeat_id);

        let siblings =
            recurrence::generate(&seed, repeat_id, rule, self.settings.never_horizon_days)?;
        let mut batch = Vec::with_capacity(siblings.len() + 1);
        batch.push(seed);
        batch.extend(siblings);

        let inserted = self.store.insert_tasks(batch)?;
        log::info!("Created series {} with {} tasks", repeat_id, inserted.len());
        Ok(inserted)
    }

    /// Turn a stored task into the seed of a new series.
    ///
    /// The siblings are generated first, then the seed is stamped and the
    /// batch inserted. A failed insert leaves the seed stamped with an
    /// otherwise empty series; the caller refetches and retries the whole
    /// action.
    pub fn repeat_existing(
        &mut self,
        task_id: TaskId,
        rule: &RecurrenceRule,
    ) -> Result<Vec<Task>, PlannerError> {
        let seed = self.store.get_task(task_id)?;
        if seed.repeat_id.is_some() {
            return Err(PlannerError::AlreadyRepeating(task_id));
        }

        let repeat_id = RepeatId::new();
        let siblings =
            recurrence::generate(&seed, repeat_id, rule, self.settings.never_horizon_days)?;

        let stamp = TaskPatch {
            repeat_id: Some(repeat_id),
            ..TaskPatch::default()
        };
        self.store.update_task(task_id, &stamp)?;

        let inserted = self.store.insert_tasks(siblings)?;
        log::info!(
            "Task {} became series {} with {} siblings",
            task_id,
            repeat_id,
            inserted.len()
        );
        Ok(inserted)
    }

    /// Generate the next stretch of an open-ended series.
    ///
    /// Re-invokes generation with the latest occurrence as the seed, so a
    /// series created with no end date can be renewed as its horizon
    /// approaches.
    pub fn extend_series(
        &mut self,
        repeat_id: RepeatId,
        rule: &RecurrenceRule,
    ) -> Result<Vec<Task>, PlannerError> {
        let tasks = self.store.list_tasks()?;
        let last = tasks
            .iter()
            .filter(|t| t.repeat_id == Some(repeat_id))
            .last()
            .ok_or(PlannerError::SeriesNotFound(repeat_id))?;

        let siblings =
            recurrence::generate(last, repeat_id, rule, self.settings.never_horizon_days)?;
        let inserted = self.store.insert_tasks(siblings)?;
        log::info!(
            "Extended series {} by {} tasks from {}",
            repeat_id,
            inserted.len(),
            last.start_date
        );
        Ok(inserted)
    }

    /// Write the date change a drag release produced.
    pub fn commit_drag(&mut self, commit: DragCommit) -> Result<Task, PlannerError> {
        let patch = TaskPatch::reschedule(commit.start_date, commit.end_date);
        let updated = self.store.update_task(commit.task_id, &patch)?;
        log::debug!(
            "Committed drag for {}: {} to {}",
            updated.id,
            updated.start_date,
            updated.end_date
        );
        Ok(updated)
    }

    /// Apply a field edit to the target and, per scope, its siblings.
    ///
    /// Updates are applied one task at a time with no retry; a mid-batch
    /// store failure surfaces immediately and the caller refetches.
    pub fn update_scoped(
        &mut self,
        target_id: TaskId,
        scope: EditScope,
        patch: &TaskPatch,
    ) -> Result<Vec<Task>, PlannerError> {
        let tasks = self.store.list_tasks()?;
        let target = tasks
            .iter()
            .find(|t| t.id == target_id)
            .ok_or(StoreError::NotFound(target_id))?;

        let ids = scope::resolve(&tasks, target, scope);
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            updated.push(self.store.update_task(id, patch)?);
        }
        log::info!("Applied {:?} edit to {} tasks", scope, updated.len());
        Ok(updated)
    }

    /// Delete the target and, per scope, its siblings.
    pub fn delete_scoped(
        &mut self,
        target_id: TaskId,
        scope: EditScope,
    ) -> Result<Vec<TaskId>, PlannerError> {
        let tasks = self.store.list_tasks()?;
        let target = tasks
            .iter()
            .find(|t| t.id == target_id)
            .ok_or(StoreError::NotFound(target_id))?;

        let ids = scope::resolve(&tasks, target, scope);
        self.store.delete_tasks(&ids)?;
        log::info!("Deleted {} tasks ({:?} scope)", ids.len(), scope);
        Ok(ids)
    }
}
