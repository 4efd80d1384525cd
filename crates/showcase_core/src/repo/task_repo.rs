//! Task list snapshot repository.
//!
//! # Responsibility
//! - Serialize the whole task list under one storage key.
//! - Decode stored snapshots back into an ordered list.
//!
//! # Invariants
//! - Writes always replace the full snapshot; there is no partial update.
//! - Read paths reject snapshots with duplicate ids instead of masking them.

use crate::model::task::{Task, TaskId};
use crate::repo::local_storage::{LocalStorage, StorageError, StorageResult};
use std::collections::HashSet;

/// Key the task list snapshot is stored under.
pub const TASKS_STORAGE_KEY: &str = "tasks";

/// Repository interface for whole-list task persistence.
pub trait TaskRepository {
    /// Returns `None` when nothing has been stored yet.
    fn load_tasks(&self) -> StorageResult<Option<Vec<Task>>>;
    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()>;
}

/// Stores the task list as a JSON array inside a `LocalStorage` slot.
pub struct LocalStorageTaskRepository<S: LocalStorage> {
    storage: S,
    key: String,
}

impl<S: LocalStorage> LocalStorageTaskRepository<S> {
    /// Uses the default `tasks` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: LocalStorage> TaskRepository for LocalStorageTaskRepository<S> {
    fn load_tasks(&self) -> StorageResult<Option<Vec<Task>>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        decode_snapshot(&self.key, &raw).map(Some)
    }

    fn save_tasks(&self, tasks: &[Task]) -> StorageResult<()> {
        let encoded = encode_snapshot(tasks)?;
        self.storage.set_item(&self.key, &encoded)
    }
}

/// Encodes tasks into the persisted JSON array form.
pub fn encode_snapshot(tasks: &[Task]) -> StorageResult<String> {
    serde_json::to_string(tasks).map_err(StorageError::Encode)
}

/// Decodes a persisted JSON array, validating id uniqueness.
pub fn decode_snapshot(key: &str, raw: &str) -> StorageResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw).map_err(|source| StorageError::Corrupt {
        key: key.to_string(),
        source,
    })?;

    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(StorageError::InvalidData(format!(
                "duplicate task id `{}` under `{key}`",
                task.id
            )));
        }
    }

    Ok(tasks)
}
