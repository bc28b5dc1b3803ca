//! Core domain logic for the task dashboard.
//!
//! Tasks carry a generated summary and are stored in SQLite alongside a
//! history of weather lookups. Presentation layers drive everything through
//! `TaskService` and `WeatherService`, constructed over a caller-owned
//! connection.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod summarizer;
pub mod weather;

pub use config::{AppConfig, ConfigError, WeatherConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{NewTask, Priority, Task, TaskDraft, TaskId, TaskStatus, TaskValidationError};
pub use model::weather::{WeatherLog, WeatherLogId, WeatherReport};
pub use repo::task_repo::{SqliteTaskRepository, TaskFilter, TaskRepository};
pub use repo::weather_log_repo::{SqliteWeatherLogRepository, WeatherLogRepository};
pub use repo::{RepoError, RepoResult};
pub use service::dashboard::{DashboardMetrics, DashboardSnapshot};
pub use service::error::{ErrorKind, ServiceError, Severity, STATUS_CREATED, STATUS_DELETED};
pub use service::task_service::TaskService;
pub use service::weather_service::{WeatherService, DEFAULT_HISTORY_LIMIT};
pub use summarizer::summarize;
pub use weather::{WeatherClient, WeatherError, WeatherProvider};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
