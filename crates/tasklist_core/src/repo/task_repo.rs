//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level CRUD over the `tasks` table.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Rows are enumerated in `seq` order, which is insertion order.
//! - Read paths reject malformed persisted identities instead of masking them.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT uuid, title FROM tasks";
const REQUIRED_TASK_COLUMNS: &[&str] = &["seq", "uuid", "title", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task rows.
pub trait TaskRepository {
    /// Inserts a task carrying a pre-assigned identity.
    fn insert_task(&self, task: &Task) -> RepoResult<()>;
    /// Sets the title of an existing task.
    ///
    /// Returns `Ok(false)` when the stored title already equals `title`.
    fn update_title(&self, id: TaskId, title: &str) -> RepoResult<bool>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists every task in store enumeration order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Hard-deletes one task.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
///
/// Works on a plain connection or on a `Transaction` (via deref).
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository after checking the connection is migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Constructs a repository on a connection already checked by `try_new`.
    pub(crate) fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO tasks (uuid, title) VALUES (?1, ?2);",
            params![task.id.to_string(), task.title.as_str()],
        )?;
        Ok(())
    }

    fn update_title(&self, id: TaskId, title: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND title IS NOT ?2;",
            params![id.to_string(), title],
        )?;

        if changed > 0 {
            return Ok(true);
        }
        if self.exists(id)? {
            return Ok(false);
        }
        Err(RepoError::NotFound(id))
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

impl SqliteTaskRepository<'_> {
    fn exists(&self, id: TaskId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM tasks WHERE uuid = ?1;",
                [id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'tasks'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("tasks"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(tasks);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    for required in REQUIRED_TASK_COLUMNS {
        if !columns.iter().any(|column| column == required) {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column: *required,
            });
        }
    }

    Ok(())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    Ok(Task::with_id(id, row.get::<_, String>("title")?))
}

#[cfg(test)]
mod tests {
    use super::{SqliteTaskRepository, TaskRepository};
    use crate::db::open_db_in_memory;
    use crate::model::task::Task;
    use crate::repo::task_repo::RepoError;

    #[test]
    fn update_title_reports_unchanged_rows() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteTaskRepository::try_new(&conn).unwrap();
        let task = Task::new("same");
        repo.insert_task(&task).unwrap();

        assert!(!repo.update_title(task.id, "same").unwrap());
        assert!(repo.update_title(task.id, "other").unwrap());
    }

    #[test]
    fn malformed_uuid_is_rejected_on_read() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO tasks (uuid, title) VALUES ('not-a-uuid', 'broken');",
            [],
        )
        .unwrap();
        let repo = SqliteTaskRepository::try_new(&conn).unwrap();

        let err = repo.list_tasks().unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("not-a-uuid")));
    }
}
