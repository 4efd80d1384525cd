//! Core use-case services for the to-do list.
//!
//! # Responsibility
//! - Orchestrate task mutations and persistence into use-case level APIs.
//! - Keep hosts (CLI, UI shells) decoupled from storage details.

pub mod drag_reorder;
pub mod edit_session;
pub mod task_store;
