//! Task list store.
//!
//! # Responsibility
//! - Own the ordered task list and every mutation over it.
//! - Mirror the full list into the repository after each mutation.
//! - Project filtered views without touching the underlying order.
//!
//! # Invariants
//! - Task ids are unique and strictly increasing in issue order.
//! - Mutations never fail; unknown ids and indices degrade to no-ops.
//! - Each persisting call writes exactly one full snapshot, synchronously.
//! - Hydration failure yields an empty list and is only logged.

use crate::model::task::{DueTime, Task, TaskFilter, TaskId};
use crate::repo::local_storage::StorageError;
use crate::repo::task_repo::TaskRepository;
use log::{debug, error, info, warn};

/// Source of creation timestamps, in epoch milliseconds.
pub type Clock = fn() -> i64;

/// Wall clock used for production ids.
pub fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Per-filter task totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Owned source of truth for the to-do list.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    clock: Clock,
    last_issued_id: TaskId,
    last_persist_error: Option<StorageError>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Hydrates the list from `repo` using the wall clock for new ids.
    pub fn hydrate(repo: R) -> Self {
        Self::hydrate_with_clock(repo, system_clock)
    }

    /// Hydrates the list from `repo` with a caller-provided clock.
    pub fn hydrate_with_clock(repo: R, clock: Clock) -> Self {
        let tasks = match repo.load_tasks() {
            Ok(Some(tasks)) => {
                info!(
                    "event=tasks_hydrate module=task_store status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Ok(None) => {
                info!("event=tasks_hydrate module=task_store status=empty reason=absent");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=tasks_hydrate module=task_store status=empty reason=unreadable error_code={}",
                    err.code()
                );
                Vec::new()
            }
        };
        let last_issued_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);

        Self {
            repo,
            tasks,
            clock,
            last_issued_id,
            last_persist_error: None,
        }
    }

    /// Full list in persisted and rendered order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Error of the most recent snapshot write, cleared by the next success.
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    /// Appends a pending task.
    ///
    /// Returns `None` without persisting when `text` is blank after trimming
    /// or when no unused id remains. The text itself is stored untrimmed.
    pub fn add(&mut self, text: impl Into<String>, due_date: Option<DueTime>) -> Option<TaskId> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("event=task_add module=task_store status=rejected reason=blank_text");
            return None;
        }

        let Some(id) = self.next_id() else {
            warn!(
                "event=task_add module=task_store status=rejected reason=id_exhausted last_id={}",
                self.last_issued_id
            );
            return None;
        };
        self.tasks.push(Task::new(id, text, due_date));
        debug!(
            "event=task_add module=task_store status=ok id={} has_due={}",
            id,
            due_date.is_some()
        );
        self.persist();
        Some(id)
    }

    /// Replaces the text of the matching task; returns whether one matched.
    pub fn edit(&mut self, id: TaskId, new_text: impl Into<String>) -> bool {
        let matched = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.text = new_text.into();
                true
            }
            None => false,
        };
        debug!("event=task_edit module=task_store id={} matched={}", id, matched);
        self.persist();
        matched
    }

    /// Flips `completed` on the matching task; returns whether one matched.
    pub fn toggle_completion(&mut self, id: TaskId) -> bool {
        let matched = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        };
        debug!("event=task_toggle module=task_store id={} matched={}", id, matched);
        self.persist();
        matched
    }

    /// Removes the matching task; returns whether one matched.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let matched = self.tasks.len() != before;
        debug!("event=task_delete module=task_store id={} matched={}", id, matched);
        self.persist();
        matched
    }

    /// Moves the task at `from_index` to `to_index` in the full list.
    ///
    /// - `to_index = None` (drop outside a target) changes nothing.
    /// - `from_index` out of range changes nothing.
    /// - `to_index` past the end is clamped to the last position.
    ///
    /// Returns whether the list was rewritten and persisted.
    pub fn reorder(&mut self, from_index: usize, to_index: Option<usize>) -> bool {
        let Some(to_index) = to_index else {
            debug!("event=task_reorder module=task_store status=skipped reason=no_destination");
            return false;
        };
        if from_index >= self.tasks.len() {
            debug!(
                "event=task_reorder module=task_store status=skipped reason=source_out_of_range from={} len={}",
                from_index,
                self.tasks.len()
            );
            return false;
        }

        let moved = self.tasks.remove(from_index);
        let to_index = to_index.min(self.tasks.len());
        self.tasks.insert(to_index, moved);
        debug!(
            "event=task_reorder module=task_store status=ok from={} to={}",
            from_index, to_index
        );
        self.persist();
        true
    }

    /// Tasks visible under `filter`, in list order.
    pub fn filtered_view(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    /// True list indices of the tasks visible under `filter`.
    pub fn visible_indices(&self, filter: TaskFilter) -> Vec<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| filter.matches(task))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
        }
    }

    fn next_id(&mut self) -> Option<TaskId> {
        let floor = self.last_issued_id.checked_add(1)?;
        let id = (self.clock)().max(floor);
        self.last_issued_id = id;
        Some(id)
    }

    fn persist(&mut self) {
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => {
                debug!(
                    "event=tasks_persist module=task_store status=ok count={}",
                    self.tasks.len()
                );
                self.last_persist_error = None;
            }
            Err(err) => {
                error!(
                    "event=tasks_persist module=task_store status=error count={} error_code={}",
                    self.tasks.len(),
                    err.code()
                );
                self.last_persist_error = Some(err);
            }
        }
    }
}
