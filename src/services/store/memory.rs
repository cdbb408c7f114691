// In-memory record store.
//
// Backs the tests and the demo binary. A deployment wires the planner to
// the team workspace's real store through the same trait.

use std::collections::HashMap;

use crate::models::task::{Task, TaskId, TaskPatch};

use super::{RecordStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: HashMap<TaskId, Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an initial batch.
    pub fn with_tasks(tasks: Vec<Task>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.insert_tasks(tasks)?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn insert_tasks(&mut self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError> {
        // Validate the whole batch before touching the map so one bad
        // member rejects the entire insert.
        let mut batch_ids = Vec::with_capacity(tasks.len());
        for task in &tasks {
            task.validate().map_err(StoreError::InvalidTask)?;
            if self.tasks.contains_key(&task.id) || batch_ids.contains(&task.id) {
                return Err(StoreError::InvalidTask(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
            batch_ids.push(task.id);
        }

        for task in &tasks {
            self.tasks.insert(task.id, task.clone());
        }
        Ok(tasks)
    }

    fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        let current = self.tasks.get(&id).ok_or(StoreError::NotFound(id))?;
        let mut updated = current.clone();
        patch.apply(&mut updated);
        updated.validate().map_err(StoreError::InvalidTask)?;

        self.tasks.insert(id, updated.clone());
        Ok(updated)
    }

    fn delete_tasks(&mut self, ids: &[TaskId]) -> Result<(), StoreError> {
        for id in ids {
            self.tasks.remove(id);
        }
        Ok(())
    }

    fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(tasks)
    }

    fn get_task(&self, id: TaskId) -> Result<Task, StoreError> {
        self.tasks.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}
