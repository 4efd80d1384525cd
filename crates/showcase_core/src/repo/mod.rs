//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key/value storage contract the task list persists through.
//! - Isolate SQLite and JSON details from service orchestration.
//!
//! # Invariants
//! - The task list is always written as one full snapshot.
//! - Absence of a stored value is `Ok(None)`, not an error.

pub mod local_storage;
pub mod task_repo;
