use super::{StoreError, StoreResult, TaskStorage};
use crate::config::StoreConfig;
use crate::db::{close_db, open_with_config};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
use log::{debug, error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

/// Explicitly opened handle to the task database.
///
/// Consumers receive it by reference; there is no process-wide instance.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Opens (and migrates, if needed) the store described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let conn =
            open_with_config(config).map_err(|err| StoreError::Open(RepoError::from(err)))?;
        SqliteTaskRepository::try_new(&conn).map_err(StoreError::Open)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Closes the underlying connection.
    ///
    /// All writes are already committed, so closing never loses data.
    pub fn close(self) -> StoreResult<()> {
        close_db(self.conn).map_err(StoreError::Close)
    }

    /// Returns every task in store enumeration order (insertion order).
    pub fn list(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();
        match SqliteTaskRepository::new(&self.conn).list_tasks() {
            Ok(tasks) => {
                debug!(
                    "event=task_list module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(tasks)
            }
            Err(err) => {
                error!(
                    "event=task_list module=store status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(StoreError::Read(err))
            }
        }
    }

    /// Looks up one task by identity.
    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        SqliteTaskRepository::new(&self.conn)
            .get_task(id)
            .map_err(StoreError::Read)
    }

    /// Persists a new task and returns it with its assigned identity.
    ///
    /// The title is stored as given; blank-input filtering is the caller's job.
    pub fn create(&mut self, title: impl Into<String>) -> StoreResult<Task> {
        let task = Task::new(title);
        self.write("task_create", task.id, |repo| repo.insert_task(&task))?;
        Ok(task)
    }

    /// Sets a new title on `task` and returns the updated record.
    ///
    /// Writing the title the task already has commits nothing.
    pub fn update(&mut self, task: &Task, new_title: impl Into<String>) -> StoreResult<Task> {
        let updated = task.retitled(new_title);
        self.write("task_update", task.id, |repo| {
            repo.update_title(updated.id, &updated.title).map(|_| ())
        })?;
        Ok(updated)
    }

    /// Removes `task` from the store.
    pub fn delete(&mut self, task: &Task) -> StoreResult<()> {
        self.write("task_delete", task.id, |repo| repo.delete_task(task.id))
    }

    /// Runs `op` in an immediate transaction and commits before returning.
    fn write<T>(
        &mut self,
        event: &'static str,
        task_id: TaskId,
        op: impl FnOnce(&SqliteTaskRepository<'_>) -> RepoResult<T>,
    ) -> StoreResult<T> {
        let started_at = Instant::now();
        match run_in_transaction(&mut self.conn, op) {
            Ok(value) => {
                info!(
                    "event={event} module=store status=ok task_id={task_id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event={event} module=store status=error task_id={task_id} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(StoreError::Write(err))
            }
        }
    }
}

fn run_in_transaction<T>(
    conn: &mut Connection,
    op: impl FnOnce(&SqliteTaskRepository<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    // Dropping `tx` on the error path rolls the change back.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = op(&SqliteTaskRepository::new(&tx))?;
    tx.commit()?;
    Ok(value)
}

impl TaskStorage for TaskStore {
    fn list(&self) -> StoreResult<Vec<Task>> {
        TaskStore::list(self)
    }

    fn create(&mut self, title: &str) -> StoreResult<Task> {
        TaskStore::create(self, title)
    }

    fn update(&mut self, task: &Task, new_title: &str) -> StoreResult<Task> {
        TaskStore::update(self, task, new_title)
    }

    fn delete(&mut self, task: &Task) -> StoreResult<()> {
        TaskStore::delete(self, task)
    }
}
