//! Weather query history repository.
//!
//! # Invariants
//! - Rows are append-only; the only mutation besides insert is hard delete.
//! - `recent_logs` orders by `timestamp DESC, id DESC` so rows written in the
//!   same second stay newest-first.

use super::{ensure_connection_ready, RepoError, RepoResult};
use crate::model::weather::{WeatherLog, WeatherLogId};
use rusqlite::{params, Connection, Row};

const WEATHER_LOG_COLUMNS: &[&str] = &["id", "city", "temperature", "condition", "timestamp"];

/// Repository interface for weather log persistence.
pub trait WeatherLogRepository {
    fn insert_log(&self, city: &str, temperature: &str, condition: &str)
        -> RepoResult<WeatherLog>;
    fn recent_logs(&self, limit: u32) -> RepoResult<Vec<WeatherLog>>;
    fn delete_log(&self, id: WeatherLogId) -> RepoResult<()>;
}

/// SQLite-backed weather log repository.
pub struct SqliteWeatherLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWeatherLogRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "weather_logs", WEATHER_LOG_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl WeatherLogRepository for SqliteWeatherLogRepository<'_> {
    fn insert_log(
        &self,
        city: &str,
        temperature: &str,
        condition: &str,
    ) -> RepoResult<WeatherLog> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO weather_logs (city, temperature, condition)
             VALUES (?1, ?2, ?3)
             RETURNING id, city, temperature, condition, timestamp;",
        )?;
        let mut rows = stmt.query(params![city, temperature, condition])?;

        if let Some(row) = rows.next()? {
            return parse_log_row(row);
        }

        Err(RepoError::InvalidData("weather log insert returned no row".to_string()))
    }

    fn recent_logs(&self, limit: u32) -> RepoResult<Vec<WeatherLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, city, temperature, condition, timestamp
             FROM weather_logs
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_log_row(row)?);
        }
        Ok(logs)
    }

    fn delete_log(&self, id: WeatherLogId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM weather_logs WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "weather log",
                id,
            });
        }

        Ok(())
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<WeatherLog> {
    Ok(WeatherLog {
        id: row.get("id")?,
        city: row.get("city")?,
        temperature: row.get("temperature")?,
        condition: row.get("condition")?,
        timestamp: row.get("timestamp")?,
    })
}
