//! Ordered in-memory task collection.
//!
//! # Responsibility
//! - Own the tasks of one session in insertion order.
//! - Provide index access and keyword search.
//!
//! # Invariants
//! - Insertion order is display order and on-disk order.
//! - Indices are 0-based here; callers validate range before access, so an
//!   out-of-bounds index is a programming error and panics.

use crate::model::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the end of the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> &Task {
        &self.tasks[index]
    }

    /// Mutable handle into the owned task, so edits are seen by `save`.
    pub fn get_mut(&mut self, index: usize) -> &mut Task {
        &mut self.tasks[index]
    }

    /// Removes and returns the task at `index`, shifting later tasks down.
    pub fn remove(&mut self, index: usize) -> Task {
        self.tasks.remove(index)
    }

    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read-only view for printing and serialization.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks whose description contains `keyword` (case-sensitive), in list order.
    pub fn find_by_description_contains(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .collect()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}
