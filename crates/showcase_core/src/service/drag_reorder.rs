//! Drag gesture to reorder translation.
//!
//! # Responsibility
//! - Track one in-flight drag (`Idle -> Dragging -> Idle`).
//! - Map positions in the displayed (possibly filtered) view to true list
//!   indices and issue a single `TaskStore::reorder`.
//!
//! # Invariants
//! - At most one drag is in flight.
//! - Drop without destination and cancel never mutate the list.
//! - Under `TaskFilter::All` view positions equal list indices.

use crate::model::task::{TaskFilter, TaskId};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_store::TaskStore;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        task_id: TaskId,
        filter: TaskFilter,
        from_view_index: usize,
    },
}

/// Result of finishing a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in flight.
    NotDragging,
    /// Dropped outside a target, or the dragged task vanished meanwhile.
    Cancelled,
    Moved { from_index: usize, to_index: usize },
}

#[derive(Debug)]
pub struct DragReorderController {
    state: DragState,
}

impl Default for DragReorderController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragReorderController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts dragging the task shown at `view_index` under `filter`.
    ///
    /// Returns `false` and stays idle when nothing is shown there. A pick-up
    /// during an existing drag replaces that drag.
    pub fn pick_up<R: TaskRepository>(
        &mut self,
        store: &TaskStore<R>,
        filter: TaskFilter,
        view_index: usize,
    ) -> bool {
        let Some(task) = store.filtered_view(filter).get(view_index).copied() else {
            self.state = DragState::Idle;
            return false;
        };

        self.state = DragState::Dragging {
            task_id: task.id,
            filter,
            from_view_index: view_index,
        };
        debug!(
            "event=drag_start module=drag id={} filter={} view_index={}",
            task.id, filter, view_index
        );
        true
    }

    /// Finishes the gesture at `destination` (a view position), if any.
    pub fn drop<R: TaskRepository>(
        &mut self,
        store: &mut TaskStore<R>,
        destination: Option<usize>,
    ) -> DropOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        let DragState::Dragging {
            task_id,
            filter,
            from_view_index,
        } = state
        else {
            return DropOutcome::NotDragging;
        };

        let Some(destination) = destination else {
            debug!("event=drag_end module=drag status=cancelled reason=no_destination");
            return DropOutcome::Cancelled;
        };
        let Some(from_index) = store.position(task_id) else {
            debug!("event=drag_end module=drag status=cancelled reason=task_missing");
            return DropOutcome::Cancelled;
        };
        let Some(to_index) = view_to_list_index(store, filter, destination) else {
            return DropOutcome::Cancelled;
        };

        store.reorder(from_index, Some(to_index));
        debug!(
            "event=drag_end module=drag status=moved filter={} view_from={} view_to={} from={} to={}",
            filter, from_view_index, destination, from_index, to_index
        );
        DropOutcome::Moved {
            from_index,
            to_index,
        }
    }

    /// Abandons the gesture without touching the list.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// True index of the task shown at `view_index`; past the end maps to the
/// last visible task.
fn view_to_list_index<R: TaskRepository>(
    store: &TaskStore<R>,
    filter: TaskFilter,
    view_index: usize,
) -> Option<usize> {
    let visible = store.visible_indices(filter);
    visible
        .get(view_index)
        .or_else(|| visible.last())
        .copied()
}
