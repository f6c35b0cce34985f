use crate::db::DbError;
use crate::repo::task_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure, split by the phase that failed.
#[derive(Debug)]
pub enum StoreError {
    /// Opening or validating the backing database failed.
    Open(RepoError),
    /// Enumerating or reading existing tasks failed.
    Read(RepoError),
    /// Persisting a create/update/delete failed; nothing was committed.
    Write(RepoError),
    /// SQLite reported an error while closing the connection.
    Close(DbError),
}

impl StoreError {
    /// Returns `true` for a write that targeted a task no longer in the store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Write(RepoError::NotFound(_)))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open task store: {err}"),
            Self::Read(err) => write!(f, "failed to read tasks: {err}"),
            Self::Write(err) => write!(f, "failed to persist task change: {err}"),
            Self::Close(err) => write!(f, "failed to close task store: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Read(err) | Self::Write(err) => Some(err),
            Self::Close(err) => Some(err),
        }
    }
}
