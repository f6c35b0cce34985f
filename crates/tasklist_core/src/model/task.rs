//! Task domain model.
//!
//! # Invariants
//! - `id` is assigned once by the store and never reused for another task.
//! - `title` carries no uniqueness or length constraint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a persisted task.
pub type TaskId = Uuid;

/// A persisted `(identity, title)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
}

impl Task {
    /// Builds a task with a freshly generated identity.
    ///
    /// Only the store calls this; callers receive tasks from `TaskStore::create`.
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Builds a task with a known identity, e.g. when reading a row back.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Returns a copy carrying `title` and the same identity.
    pub fn retitled(&self, title: impl Into<String>) -> Self {
        Self::with_id(self.id, title)
    }
}
