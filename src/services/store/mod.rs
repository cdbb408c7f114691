//! Record store boundary.
//! The engine computes mutations in memory and hands them to a store
//! behind this trait; transport, schema, and retry are the store's
//! concern, not the engine's.

pub mod memory;

use thiserror::Error;

use crate::models::task::{Task, TaskId, TaskPatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("invalid task: {0}")]
    InvalidTask(String),
    /// Persistence failure surfaced verbatim; the engine never retries.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence operations the planner drives.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Insert a batch atomically: either every task lands or none do.
    fn insert_tasks(&mut self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError>;

    /// Apply a partial edit and return the stored result.
    fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<Task, StoreError>;

    /// Delete the given ids. Ids that are already gone are ignored.
    fn delete_tasks(&mut self, ids: &[TaskId]) -> Result<(), StoreError>;

    /// Snapshot of every stored task, ordered by start date.
    fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Fetch one task by id.
    fn get_task(&self, id: TaskId) -> Result<Task, StoreError>;
}
