//! Service-level error taxonomy shared by task and weather use-cases.
//!
//! Every failure a service can return maps to exactly one `ErrorKind`, and
//! each kind maps to the status-code vocabulary used by presentation layers:
//! 201 created, 200 deleted, 404 not found, 422 validation, 500 otherwise.

use crate::model::task::TaskValidationError;
use crate::repo::RepoError;
use crate::weather::WeatherError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Status reported for a successful create.
pub const STATUS_CREATED: u16 = 201;
/// Status reported for a successful delete.
pub const STATUS_DELETED: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Auth,
    Timeout,
    Storage,
    Upstream,
}

/// How loudly a presentation layer should surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug)]
pub enum ServiceError {
    /// Bad or missing input; the caller can fix it and retry.
    Validation(String),
    /// Referenced id or city does not exist.
    NotFound(String),
    Auth(WeatherError),
    Timeout(WeatherError),
    Upstream(WeatherError),
    Storage(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Auth(_) => ErrorKind::Auth,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 422,
            ErrorKind::NotFound => 404,
            ErrorKind::Auth | ErrorKind::Timeout | ErrorKind::Storage | ErrorKind::Upstream => 500,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation error: {message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Auth(err) | Self::Timeout(err) | Self::Upstream(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "database error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(_) | Self::NotFound(_) => None,
            Self::Auth(err) | Self::Timeout(err) | Self::Upstream(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for ServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { .. } => Self::NotFound(value.to_string()),
            other => Self::Storage(other),
        }
    }
}

impl From<WeatherError> for ServiceError {
    fn from(value: WeatherError) -> Self {
        match value {
            WeatherError::NotFound(_) => Self::NotFound(value.to_string()),
            WeatherError::Auth => Self::Auth(value),
            WeatherError::Timeout { .. } => Self::Timeout(value),
            WeatherError::Upstream { .. } => Self::Upstream(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_codes_and_severity() {
        let validation = ServiceError::from(TaskValidationError::EmptyTitle);
        assert_eq!(validation.status_code(), 422);
        assert_eq!(validation.severity(), Severity::Warning);

        let missing = ServiceError::from(RepoError::NotFound {
            entity: "task",
            id: 9,
        });
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.to_string(), "task not found: 9");

        let auth = ServiceError::from(WeatherError::Auth);
        assert_eq!(auth.kind(), ErrorKind::Auth);
        assert_eq!(auth.status_code(), 500);
        assert_eq!(auth.severity(), Severity::Error);

        let storage = ServiceError::from(RepoError::InvalidData("bad".to_string()));
        assert_eq!(storage.kind(), ErrorKind::Storage);
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn weather_not_found_keeps_city_in_message() {
        let err = ServiceError::from(WeatherError::NotFound("Nowhereville".to_string()));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Nowhereville"));
    }

    #[test]
    fn timeout_is_distinct_from_upstream() {
        let timeout = ServiceError::from(WeatherError::Timeout {
            provider: "OpenWeatherMap",
        });
        let upstream = ServiceError::from(WeatherError::Upstream {
            provider: "OpenWeatherMap",
            message: "status 503".to_string(),
        });
        assert_eq!(timeout.kind(), ErrorKind::Timeout);
        assert_eq!(upstream.kind(), ErrorKind::Upstream);
    }
}
