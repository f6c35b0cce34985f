//! Store location and connection settings.
//!
//! # Responsibility
//! - Describe where the task database lives and how connections are tuned.
//! - Stay serializable so host applications can embed it in their settings.
//!
//! # Invariants
//! - `StoreConfig::default()` is an in-memory store; nothing touches disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Busy timeout applied to every opened connection unless overridden.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Backing location for the task database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreLocation {
    /// SQLite database file. Created on first open.
    File { path: PathBuf },
    /// Private in-memory database, discarded on close.
    Memory,
}

/// Settings used by `TaskStore::open`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub location: StoreLocation,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl StoreConfig {
    /// Config for a database file at `path`.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File {
                path: path.as_ref().to_path_buf(),
            },
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Config for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Short label used in log events (`file` or `memory`).
    pub(crate) fn mode(&self) -> &'static str {
        match self.location {
            StoreLocation::File { .. } => "file",
            StoreLocation::Memory => "memory",
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, StoreLocation, DEFAULT_BUSY_TIMEOUT_MS};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn default_is_in_memory() {
        let config = StoreConfig::default();
        assert_eq!(config.location, StoreLocation::Memory);
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(config.mode(), "memory");
    }

    #[test]
    fn file_config_keeps_path_and_timeout_override() {
        let config = StoreConfig::file("/tmp/tasks.sqlite3").with_busy_timeout_ms(250);
        assert_eq!(
            config.location,
            StoreLocation::File {
                path: PathBuf::from("/tmp/tasks.sqlite3")
            }
        );
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
        assert_eq!(config.mode(), "file");
    }
}
