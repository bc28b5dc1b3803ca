//! Task store bootstrap: one SQLite file holding `tasks` and `weather_logs`.
//!
//! `open_db` and `open_db_in_memory` hand back a connection that is already
//! migrated to `migrations::latest_version()`. `reset_db` is the destructive
//! maintenance path behind `taskpro db reset`.
//!
//! The schema version lives in `PRAGMA user_version`. A file written by a
//! newer build is refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, reset_db};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening, migrating or resetting the task store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a pragma, migration statement or reset step.
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer taskpro build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "task store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "task store schema v{db_version} was written by a newer taskpro (this build supports up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn newer_schema_message_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 4,
            latest_supported: 1,
        };
        let message = err.to_string();
        assert!(message.contains("v4"));
        assert!(message.contains("v1"));
    }
}
