//! In-memory task store for escalated review tasks
//!
//! Single-process and volatile. All mutation goes through one `RwLock`, so a
//! read-modify-write executed via [`TaskStore::update`] is atomic with respect
//! to every other store operation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::types::*;

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Result type for task store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Shared reference to TaskStore
pub type SharedTaskStore = Arc<TaskStore>;

#[derive(Default)]
struct StoreInner {
    tasks: HashMap<TaskId, ReviewTask>,
    /// IDs still waiting for humans, in creation order
    pending: Vec<TaskId>,
}

/// In-memory store owning the lifecycle state of every review task
///
/// Lookups of unknown IDs return `Ok(None)`; translating absence into a
/// user-facing error is left to the caller.
#[derive(Default)]
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared reference to this store
    pub fn shared(self) -> SharedTaskStore {
        Arc::new(self)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Create a new task waiting for human votes
    pub fn create(
        &self,
        text: String,
        model_label: Label,
        model_confidence: f32,
    ) -> StoreResult<ReviewTask> {
        let mut inner = self.write()?;

        let task_id = loop {
            let candidate = uuid::Uuid::new_v4().simple().to_string();
            if !inner.tasks.contains_key(&candidate) {
                break candidate;
            }
        };

        let task = ReviewTask::new(task_id.clone(), text, model_label, model_confidence);
        inner.tasks.insert(task_id.clone(), task.clone());
        inner.pending.push(task_id);

        debug!(task_id = %task.task_id, "Task created");
        Ok(task)
    }

    /// Get a snapshot of a task by ID
    pub fn get(&self, task_id: &str) -> StoreResult<Option<ReviewTask>> {
        Ok(self.read()?.tasks.get(task_id).cloned())
    }

    /// Append a vote to a task
    pub fn append_vote(
        &self,
        task_id: &str,
        label: Label,
        worker_id: Option<String>,
    ) -> StoreResult<Option<ReviewTask>> {
        self.update(task_id, |task| {
            task.push_vote(label, worker_id);
            task.clone()
        })
    }

    /// Resolve a task. The first finalize wins; later calls leave the task
    /// unchanged and return it as-is.
    pub fn finalize(&self, task_id: &str, final_label: Label) -> StoreResult<Option<ReviewTask>> {
        self.update(task_id, |task| {
            task.finalize(final_label);
            task.clone()
        })
    }

    /// Run `f` against a task under the write lock
    ///
    /// Returns `Ok(None)` if the task does not exist. The pending queue is
    /// kept in sync when `f` completes the task.
    pub fn update<R>(
        &self,
        task_id: &str,
        f: impl FnOnce(&mut ReviewTask) -> R,
    ) -> StoreResult<Option<R>> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        let Some(task) = inner.tasks.get_mut(task_id) else {
            return Ok(None);
        };

        let out = f(task);

        if task.is_completed() {
            inner.pending.retain(|id| id != task_id);
        }

        Ok(Some(out))
    }

    /// Snapshot of all tasks (order not meaningful)
    pub fn list(&self) -> StoreResult<Vec<ReviewTask>> {
        Ok(self.read()?.tasks.values().cloned().collect())
    }

    /// Tasks still waiting for humans, oldest first
    pub fn list_pending(&self) -> StoreResult<Vec<ReviewTask>> {
        let inner = self.read()?;
        Ok(inner
            .pending
            .iter()
            .filter_map(|id| inner.tasks.get(id).cloned())
            .collect())
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    /// Drop every task. Intended for test isolation.
    pub fn reset(&self) -> StoreResult<()> {
        let mut inner = self.write()?;
        inner.tasks.clear();
        inner.pending.clear();
        Ok(())
    }
}
