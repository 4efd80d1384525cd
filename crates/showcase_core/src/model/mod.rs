//! Domain model for the task list.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the persisted field naming (`camelCase`) of task records.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the ordered list.

pub mod task;
