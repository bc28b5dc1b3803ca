//! Weather lookup use-case service.
//!
//! # Responsibility
//! - Run lookups through the provider facade and record successful ones.
//! - Expose query history listing and deletion.
//!
//! # Invariants
//! - Failed lookups write no log row.
//! - The city is stored exactly as the caller typed it.

use crate::model::weather::{WeatherLog, WeatherLogId, WeatherReport};
use crate::repo::weather_log_repo::WeatherLogRepository;
use crate::repo::RepoError;
use crate::service::error::ServiceError;
use crate::weather::WeatherClient;
use log::{error, info};

/// History rows shown when the caller does not ask for a specific count.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Use-case service for weather lookups and their history.
pub struct WeatherService<R: WeatherLogRepository> {
    repo: R,
    client: WeatherClient,
}

impl<R: WeatherLogRepository> WeatherService<R> {
    pub fn new(repo: R, client: WeatherClient) -> Self {
        Self { repo, client }
    }

    /// Fetches current weather for `city` and records it in the history.
    ///
    /// `api_key` selects the keyed provider when present and non-blank.
    pub async fn lookup_and_log(
        &self,
        city: &str,
        api_key: Option<&str>,
    ) -> Result<WeatherReport, ServiceError> {
        if city.trim().is_empty() {
            return Err(ServiceError::Validation("city is required".to_string()));
        }

        let report = self.client.fetch_weather(city, api_key).await?;

        match self
            .repo
            .insert_log(city, &report.temperature, &report.condition)
        {
            Ok(log_row) => {
                info!(
                    "event=weather_log module=service status=ok log_id={} source={}",
                    log_row.id, report.source
                );
                Ok(report)
            }
            Err(err) => {
                error!("event=weather_log module=service status=error error={err}");
                Err(ServiceError::Storage(err))
            }
        }
    }

    /// Most recent lookups first.
    pub fn recent_logs(&self, limit: u32) -> Result<Vec<WeatherLog>, ServiceError> {
        Ok(self.repo.recent_logs(limit)?)
    }

    /// Permanently deletes one history row.
    pub fn delete_log(&self, id: WeatherLogId) -> Result<(), ServiceError> {
        match self.repo.delete_log(id) {
            Ok(()) => {
                info!("event=weather_log_delete module=service status=ok log_id={id}");
                Ok(())
            }
            Err(err @ RepoError::NotFound { .. }) => {
                info!("event=weather_log_delete module=service status=not_found log_id={id}");
                Err(err.into())
            }
            Err(err) => {
                error!(
                    "event=weather_log_delete module=service status=error log_id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }
}
