//! Core domain logic for the Showcase portfolio demos.
//! This crate is the single source of truth for business invariants.

pub mod calculator;
pub mod config;
pub mod db;
pub mod gallery;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod shell;

pub use calculator::display::{CalcKey, Calculator, Theme};
pub use calculator::expr::{evaluate, format_number, EvalError, EvalResult};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{DueTime, Task, TaskFilter, TaskId};
pub use repo::local_storage::{
    LocalStorage, MemoryLocalStorage, SqliteLocalStorage, StorageError, StorageResult,
};
pub use repo::task_repo::{LocalStorageTaskRepository, TaskRepository, TASKS_STORAGE_KEY};
pub use service::drag_reorder::{DragReorderController, DragState, DropOutcome};
pub use service::edit_session::{EditDraft, EditSession};
pub use service::task_store::{TaskCounts, TaskStore};
pub use shell::Route;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
