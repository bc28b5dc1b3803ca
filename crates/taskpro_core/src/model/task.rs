//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its enumerations.
//! - Validate raw creation input into a typed draft.
//!
//! # Invariants
//! - `summary` is always present on a stored task.
//! - `id` and `created_at` are set by the store and never change.
//! - A `TaskDraft` always has a non-blank title and content.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier.
pub type TaskId = i64;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Value stored in `tasks.priority`.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses either the label or the stored value, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_db() == normalized)
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Value stored in `tasks.status`.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Parses `In Progress`, `in_progress` and friends, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_db() == normalized)
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub content: String,
    /// Derived from `content` once, at creation.
    pub summary: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    /// Unix epoch milliseconds, set by the store.
    pub created_at: i64,
}

/// Raw task creation input as collected from a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub content: String,
    /// `None` means the default (`Medium`).
    pub priority: Option<String>,
    /// `None` means the default (`Todo`).
    pub status: Option<String>,
    /// ISO `YYYY-MM-DD`; `None` or blank means no due date.
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Checks required fields and parses enumerations and the due date.
    ///
    /// The title is trimmed; content is kept verbatim because it feeds the
    /// summary.
    pub fn validate(&self) -> Result<TaskDraft, TaskValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(TaskValidationError::EmptyContent);
        }

        let priority = match self.priority.as_deref() {
            None => Priority::default(),
            Some(value) => Priority::parse(value)
                .ok_or_else(|| TaskValidationError::InvalidPriority(value.to_string()))?,
        };

        let status = match self.status.as_deref() {
            None => TaskStatus::default(),
            Some(value) => TaskStatus::parse(value)
                .ok_or_else(|| TaskValidationError::InvalidStatus(value.to_string()))?,
        };

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_due_date(value).ok_or_else(|| {
                TaskValidationError::InvalidDueDate(value.to_string())
            })?),
        };

        Ok(TaskDraft {
            title: title.to_string(),
            content: self.content.clone(),
            priority,
            status,
            due_date,
        })
    }
}

/// Validated task fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// Reasons task input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    EmptyContent,
    InvalidPriority(String),
    InvalidStatus(String),
    InvalidDueDate(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::EmptyContent => write!(f, "content is required"),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected Low|Medium|High")
            }
            Self::InvalidStatus(value) => {
                write!(f, "invalid status `{value}`; expected Todo|In Progress|Done")
            }
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Parses a stored or user-entered due date.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT).ok()
}

/// Formats a due date for storage.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}
