//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist validated task drafts together with their summary.
//! - Provide filtered listing and hard deletion over `tasks`.
//!
//! # Invariants
//! - Inserts write the summary in the same statement as the task row, so a
//!   task never exists without one.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::task::{
    format_due_date, parse_due_date, Priority, Task, TaskDraft, TaskId, TaskStatus,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "summary",
    "status",
    "priority",
    "due_date",
    "created_at",
];

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    summary,
    status,
    priority,
    due_date,
    created_at
FROM tasks";

/// Listing filter. Criteria are ANDed; empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub statuses: Vec<TaskStatus>,
    pub priorities: Vec<Priority>,
    /// Case-sensitive substring of the title.
    pub title_contains: Option<String>,
}

impl TaskFilter {
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities = priorities.into_iter().collect();
        self
    }

    pub fn with_title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }
}

/// Repository interface for task persistence.
pub trait TaskRepository {
    /// Inserts one task and returns it with store-assigned id and timestamp.
    fn create_task(&self, draft: &TaskDraft, summary: &str) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists tasks matching `filter`, ordered by id ascending.
    fn list_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>>;
    /// Permanently deletes one task. Returns `NotFound` when absent.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, draft: &TaskDraft, summary: &str) -> RepoResult<Task> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO tasks (
                title,
                content,
                summary,
                status,
                priority,
                due_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING
                id,
                title,
                content,
                summary,
                status,
                priority,
                due_date,
                created_at;",
        )?;

        let mut rows = stmt.query(params![
            draft.title.as_str(),
            draft.content.as_str(),
            summary,
            draft.status.as_db(),
            draft.priority.as_db(),
            draft.due_date.map(format_due_date),
        ])?;

        if let Some(row) = rows.next()? {
            return parse_task_row(row);
        }

        Err(RepoError::InvalidData("task insert returned no row".to_string()))
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !filter.statuses.is_empty() {
            sql.push_str(&format!(
                " AND status IN ({})",
                placeholders(filter.statuses.len())
            ));
            bind_values.extend(
                filter
                    .statuses
                    .iter()
                    .map(|status| Value::Text(status.as_db().to_string())),
            );
        }

        if !filter.priorities.is_empty() {
            sql.push_str(&format!(
                " AND priority IN ({})",
                placeholders(filter.priorities.len())
            ));
            bind_values.extend(
                filter
                    .priorities
                    .iter()
                    .map(|priority| Value::Text(priority.as_db().to_string())),
            );
        }

        if let Some(needle) = filter.title_contains.as_deref().filter(|v| !v.is_empty()) {
            // instr() is case-sensitive, unlike LIKE.
            sql.push_str(" AND instr(title, ?) > 0");
            bind_values.push(Value::Text(needle.to_string()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "task", id });
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    let status = parse_stored_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_stored_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid task priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(parse_due_date(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid due date `{value}` in tasks.due_date"))
        })?),
        None => None,
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        priority,
        status,
        due_date,
        created_at: row.get("created_at")?,
    })
}

fn parse_stored_status(value: &str) -> Option<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .find(|status| status.as_db() == value)
}

fn parse_stored_priority(value: &str) -> Option<Priority> {
    Priority::ALL
        .into_iter()
        .find(|priority| priority.as_db() == value)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
