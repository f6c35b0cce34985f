//! Core domain logic for the task list.
//! This crate owns task persistence and the list presenter state.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod repo;
pub mod store;

pub use config::{StoreConfig, StoreLocation, DEFAULT_BUSY_TIMEOUT_MS};
pub use logging::{
    default_log_level, init_logging, logging_status, LoggingConfig, LoggingError,
};
pub use model::task::{Task, TaskId};
pub use presenter::{PresenterError, PresenterResult, RenderEvent, TaskListPresenter};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use store::{StoreError, StoreResult, TaskStorage, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
