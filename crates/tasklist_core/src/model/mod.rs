//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical record shared by storage and presentation.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned by the store.

pub mod task;
