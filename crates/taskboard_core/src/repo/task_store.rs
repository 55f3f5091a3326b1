//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the create/list/update contract every task store must honor.
//! - Provide the SQLite-backed reference store over `tasks` + `task_tags`.
//!
//! # Invariants
//! - Write paths call `TaskInput::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `list_all` returns tasks newest first by `created_at`.
//! - `id` and `created_at` are never rewritten by `update_by_id`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskInput, TaskPriority, TaskStatus, TaskValidationError};
use chrono::{DateTime, Utc};
use log::{error, info};
use rusqlite::{params, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    priority,
    created_at,
    updated_at
FROM tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for task store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Payload rejected before persistence.
    Validation(TaskValidationError),
    /// Update target does not exist.
    NotFound(TaskId),
    /// SQLite-level failure.
    Db(DbError),
    /// Persisted row holds a value outside the task model.
    InvalidData(String),
    /// Remote store call failed (network, non-success response).
    Transport(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Transport(message) => write!(f, "{message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable task collection consumed by the board core.
pub trait TaskStore {
    /// Returns every task, ordered by `created_at` descending.
    fn list_all(&self) -> StoreResult<Vec<Task>>;
    /// Persists a new task and returns the canonical record with id/timestamps.
    fn create(&self, input: &TaskInput) -> StoreResult<Task>;
    /// Replaces the mutable fields of an existing task.
    fn update_by_id(&self, id: TaskId, input: &TaskInput) -> StoreResult<Task>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn list_all(&self) -> StoreResult<Vec<Task>> {
        (**self).list_all()
    }

    fn create(&self, input: &TaskInput) -> StoreResult<Task> {
        (**self).create(input)
    }

    fn update_by_id(&self, id: TaskId, input: &TaskInput) -> StoreResult<Task> {
        (**self).update_by_id(id, input)
    }
}

/// SQLite-backed task store.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Wraps a connection returned by `db::open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when the schema lacks `tasks`/`task_tags`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for table in ["tasks", "task_tags"] {
            if !table_exists(conn, table)? {
                return Err(StoreError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }

    /// Gets one task by id.
    pub fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_task_row(self.conn, row)?)),
            None => Ok(None),
        }
    }

    fn read_back(&self, id: TaskId, context: &str) -> StoreResult<Task> {
        self.get_task(id)?.ok_or_else(|| {
            StoreError::InvalidData(format!("{context} task {id} missing in read-back"))
        })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn list_all(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            match parse_task_row(self.conn, row) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    error!(
                        "event=task_list module=store status=error error_code=invalid_row error={}",
                        err
                    );
                    return Err(err);
                }
            }
        }

        info!(
            "event=task_list module=store status=ok count={} duration_ms={}",
            tasks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(tasks)
    }

    fn create(&self, input: &TaskInput) -> StoreResult<Task> {
        input.validate()?;

        let id = Uuid::new_v4();
        let now = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                priority,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6);",
            params![
                id.to_string(),
                input.title.as_str(),
                input.description.as_str(),
                input.status.as_str(),
                input.priority.as_str(),
                now,
            ],
        )?;
        replace_tags(&tx, id, &input.tags)?;
        tx.commit()?;

        info!(
            "event=task_create module=store status=ok task_id={} tag_count={}",
            id,
            input.tags.len()
        );
        self.read_back(id, "created")
    }

    fn update_by_id(&self, id: TaskId, input: &TaskInput) -> StoreResult<Task> {
        input.validate()?;

        let now = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE tasks
             SET
                title = ?2,
                description = ?3,
                status = ?4,
                priority = ?5,
                updated_at = max(?6, created_at)
             WHERE id = ?1;",
            params![
                id.to_string(),
                input.title.as_str(),
                input.description.as_str(),
                input.status.as_str(),
                input.priority.as_str(),
                now,
            ],
        )?;

        if changed == 0 {
            info!("event=task_update module=store status=error error_code=not_found task_id={id}");
            return Err(StoreError::NotFound(id));
        }

        replace_tags(&tx, id, &input.tags)?;
        tx.commit()?;

        info!(
            "event=task_update module=store status=ok task_id={} tag_count={}",
            id,
            input.tags.len()
        );
        self.read_back(id, "updated")
    }
}

fn replace_tags(tx: &Transaction<'_>, id: TaskId, tags: &[String]) -> StoreResult<()> {
    let id_text = id.to_string();
    tx.execute("DELETE FROM task_tags WHERE task_id = ?1;", [id_text.as_str()])?;
    let mut insert =
        tx.prepare("INSERT INTO task_tags (task_id, position, tag) VALUES (?1, ?2, ?3);")?;
    for (position, tag) in tags.iter().enumerate() {
        insert.execute(params![id_text.as_str(), position as i64, tag.as_str()])?;
    }
    Ok(())
}

fn load_tags(conn: &Connection, id_text: &str) -> StoreResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT tag FROM task_tags WHERE task_id = ?1 ORDER BY position ASC;")?;
    let mut rows = stmt.query([id_text])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}

fn parse_task_row(conn: &Connection, row: &Row<'_>) -> StoreResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;

    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(StoreError::InvalidData(format!(
            "blank title in tasks.title for {id_text}"
        )));
    }

    let status_text: String = row.get("status")?;
    let status = status_text.parse::<TaskStatus>().map_err(|_| {
        StoreError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse::<TaskPriority>().map_err(|_| {
        StoreError::InvalidData(format!(
            "invalid task priority `{priority_text}` in tasks.priority"
        ))
    })?;

    Ok(Task {
        id,
        title,
        description: row.get("description")?,
        status,
        priority,
        tags: load_tags(conn, &id_text)?,
        created_at: Some(parse_millis(row.get("created_at")?, "created_at")?),
        updated_at: Some(parse_millis(row.get("updated_at")?, "updated_at")?),
    })
}

fn parse_millis(value: i64, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        StoreError::InvalidData(format!("timestamp `{value}` out of range in tasks.{column}"))
    })
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
