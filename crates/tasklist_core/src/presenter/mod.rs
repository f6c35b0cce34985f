//! Task list presenter state.
//!
//! # Responsibility
//! - Mirror the store in an ordered cache used for rendering.
//! - Turn add/edit/delete intents into store calls and incremental
//!   render events.
//!
//! # Invariants
//! - The cache only changes after the store confirms the operation.
//! - Blank (empty or whitespace-only) input never reaches the store.
//! - After a successful reload the cache equals the store contents.

use crate::model::task::Task;
use crate::store::{StoreError, TaskStorage};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PresenterResult<T> = Result<T, PresenterError>;

/// Incremental change the view should apply to its visual list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    /// Rows were replaced wholesale.
    Reload,
    Insert { index: usize },
    Update { index: usize },
    Remove { index: usize },
}

#[derive(Debug)]
pub enum PresenterError {
    Store(StoreError),
    RowOutOfRange { index: usize, len: usize },
}

impl Display for PresenterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::RowOutOfRange { index, len } => {
                write!(f, "row {index} is out of range for {len} tasks")
            }
        }
    }
}

impl Error for PresenterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::RowOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for PresenterError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ordered cache of the store plus the intents that mutate it.
pub struct TaskListPresenter<'s, S: TaskStorage> {
    store: &'s mut S,
    tasks: Vec<Task>,
}

impl<'s, S: TaskStorage> TaskListPresenter<'s, S> {
    /// Creates a presenter with an empty cache. Call `activate` to populate it.
    pub fn new(store: &'s mut S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
        }
    }

    /// Loads the full task list from the store.
    ///
    /// On failure the cache is left empty and the error is returned, so the
    /// view shows an empty list.
    pub fn activate(&mut self) -> PresenterResult<RenderEvent> {
        match self.store.list() {
            Ok(tasks) => {
                debug!(
                    "event=presenter_reload module=presenter status=ok count={}",
                    tasks.len()
                );
                self.tasks = tasks;
                Ok(RenderEvent::Reload)
            }
            Err(err) => {
                warn!("event=presenter_reload module=presenter status=error error={err}");
                self.tasks.clear();
                Err(err.into())
            }
        }
    }

    /// Re-fetches everything; same contract as `activate`.
    pub fn reload(&mut self) -> PresenterResult<RenderEvent> {
        self.activate()
    }

    /// Handles the "new task" dialog.
    ///
    /// Returns `Ok(None)` for blank input.
    pub fn add(&mut self, text: &str) -> PresenterResult<Option<RenderEvent>> {
        if is_blank(text) {
            debug!("event=presenter_add module=presenter status=skipped reason=blank_input");
            return Ok(None);
        }

        let task = self.store.create(text).map_err(|err| {
            warn!("event=presenter_add module=presenter status=error error={err}");
            err
        })?;
        self.tasks.push(task);
        Ok(Some(RenderEvent::Insert {
            index: self.tasks.len() - 1,
        }))
    }

    /// Handles the "edit task" dialog for the row at `index`.
    ///
    /// Returns `Ok(None)` for blank input, whatever `index` is.
    pub fn edit(&mut self, index: usize, text: &str) -> PresenterResult<Option<RenderEvent>> {
        if is_blank(text) {
            debug!("event=presenter_edit module=presenter status=skipped reason=blank_input");
            return Ok(None);
        }
        let current = row(&self.tasks, index)?;

        let updated = self.store.update(current, text).map_err(|err| {
            warn!("event=presenter_edit module=presenter status=error index={index} error={err}");
            err
        })?;
        self.tasks[index] = updated;
        Ok(Some(RenderEvent::Update { index }))
    }

    /// Deletes the row at `index`, removing it from the cache once the store
    /// has committed the delete.
    pub fn delete(&mut self, index: usize) -> PresenterResult<RenderEvent> {
        let task = row(&self.tasks, index)?;
        self.store.delete(task).map_err(|err| {
            warn!("event=presenter_delete module=presenter status=error index={index} error={err}");
            err
        })?;
        self.tasks.remove(index);
        Ok(RenderEvent::Remove { index })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn row_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_at(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Cell text, also used to prefill the edit dialog.
    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.task_at(index).map(|task| task.title.as_str())
    }
}

fn row(tasks: &[Task], index: usize) -> PresenterResult<&Task> {
    tasks.get(index).ok_or(PresenterError::RowOutOfRange {
        index,
        len: tasks.len(),
    })
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
