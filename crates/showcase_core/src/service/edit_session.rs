//! Single-slot edit-in-place session.

use crate::model::task::TaskId;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::TaskStore;

/// Task currently being edited and its unsaved text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub task_id: TaskId,
    pub buffer: String,
}

/// Holds at most one open edit; opening another discards the previous one.
#[derive(Debug, Default)]
pub struct EditSession {
    draft: Option<EditDraft>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Opens an edit on `id`, seeding the buffer with its current text.
    ///
    /// An unknown id leaves the session empty and returns `false`.
    pub fn begin<R: TaskRepository>(&mut self, store: &TaskStore<R>, id: TaskId) -> bool {
        self.draft = store.get(id).map(|task| EditDraft {
            task_id: task.id,
            buffer: task.text.clone(),
        });
        self.draft.is_some()
    }

    /// Replaces the buffer; ignored when no edit is open.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.buffer = text.into();
        }
    }

    /// Writes the buffer through `TaskStore::edit` and closes the session.
    ///
    /// Returns the edited id, or `None` when nothing was open.
    pub fn save<R: TaskRepository>(&mut self, store: &mut TaskStore<R>) -> Option<TaskId> {
        let draft = self.draft.take()?;
        store.edit(draft.task_id, draft.buffer);
        Some(draft.task_id)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
