//! The in-memory task list and its persistence discipline.

pub mod ops;

use crate::models::Task;
use crate::storage::{Storage, StorageError};

/// Owns the task sequence and mirrors every change to storage.
///
/// The in-memory sequence is authoritative for the session; storage is
/// read once at startup and rewritten in full after each dispatched
/// mutation. A blank add declines before dispatching, so it writes
/// nothing; the other mutations re-save even when the matching id was not
/// found.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
}

impl TaskStore {
    /// Read the persisted sequence through the given port.
    pub fn load(storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        let tasks = storage.load()?;
        Ok(Self { tasks, storage })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a task. Blank text is declined and nothing is written.
    pub fn add(&mut self, text: &str) -> Result<(), StorageError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        self.apply(ops::add(&self.tasks, text))
    }

    pub fn toggle(&mut self, id: &str) -> Result<(), StorageError> {
        self.apply(ops::toggle(&self.tasks, id))
    }

    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        self.apply(ops::remove(&self.tasks, id))
    }

    pub fn remove_completed(&mut self) -> Result<(), StorageError> {
        self.apply(ops::remove_completed(&self.tasks))
    }

    fn apply(&mut self, next: Vec<Task>) -> Result<(), StorageError> {
        self.tasks = next;
        self.storage.save(&self.tasks)
    }
}
