//! Durable task store.
//!
//! # Responsibility
//! - Own the single connection backing the task list.
//! - Expose `list/create/update/delete` with save-on-write semantics.
//!
//! # Invariants
//! - Every mutation commits its own transaction before returning.
//! - A mutation with nothing to change performs no write.
//! - Mutations take `&mut self`, so at most one write is in flight.

mod error;
mod task_store;

pub use error::{StoreError, StoreResult};
pub use task_store::TaskStore;

use crate::model::task::Task;

/// The four-operation contract consumed by presentation layers.
pub trait TaskStorage {
    fn list(&self) -> StoreResult<Vec<Task>>;
    fn create(&mut self, title: &str) -> StoreResult<Task>;
    fn update(&mut self, task: &Task, new_title: &str) -> StoreResult<Task>;
    fn delete(&mut self, task: &Task) -> StoreResult<()>;
}
