//! Task database lifecycle: open, migrate, close.
//!
//! # Responsibility
//! - Turn a `StoreConfig` into a ready connection, or a typed failure.
//! - Own the `tasks` schema versions.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Opening never panics on a config that deserializes.
//! - No task row is touched before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{close_db, open_db, open_db_in_memory, open_with_config};

/// Largest busy timeout SQLite accepts (`sqlite3_busy_timeout` takes an `int`).
pub const MAX_BUSY_TIMEOUT_MS: u64 = i32::MAX as u64;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Configured busy timeout does not fit SQLite's millisecond `int`.
    InvalidBusyTimeout(u64),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// SQLite refused to close the connection cleanly.
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidBusyTimeout(value) => write!(
                f,
                "busy timeout {value}ms exceeds the maximum of {MAX_BUSY_TIMEOUT_MS}ms"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "task database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Close(err) => write!(f, "closing task database failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Close(err) => Some(err),
            Self::InvalidBusyTimeout(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
