//! Weather provider facade.
//!
//! # Responsibility
//! - Define the single capability every weather backend offers (`fetch`).
//! - Select the keyed backend when a credential is supplied, the free one
//!   otherwise.
//! - Normalize transport failures into `WeatherError` kinds.
//!
//! # Invariants
//! - Selection is pure dispatch: no retry and no fallback between providers.
//! - Every provider call is bounded by the configured timeout.
//! - API keys are never written to logs.

use crate::config::WeatherConfig;
use crate::model::weather::WeatherReport;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::time::{Duration, Instant};

pub mod open_meteo;
pub mod openweather;

pub use open_meteo::{describe_weather_code, OpenMeteoProvider};
pub use openweather::OpenWeatherProvider;

const MAX_BODY_PREVIEW_CHARS: usize = 200;

/// Failure kinds surfaced by weather lookups.
#[derive(Debug)]
pub enum WeatherError {
    /// The city could not be resolved.
    NotFound(String),
    /// The supplied API key was rejected.
    Auth,
    /// The provider did not answer within the configured timeout.
    Timeout { provider: &'static str },
    /// Any other provider or transport failure.
    Upstream {
        provider: &'static str,
        message: String,
    },
}

impl Display for WeatherError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(city) => write!(f, "city '{city}' not found"),
            Self::Auth => write!(f, "invalid API key"),
            Self::Timeout { provider } => write!(f, "{provider} API timed out"),
            Self::Upstream { provider, message } => write!(f, "{provider} request failed: {message}"),
        }
    }
}

impl Error for WeatherError {}

impl WeatherError {
    fn upstream(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    /// The request URL is stripped because the keyed provider's query
    /// carries the API key.
    fn from_transport(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::upstream(provider, err.without_url().to_string())
        }
    }
}

/// One weather backend.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Display name reported as `WeatherReport::source`.
    fn name(&self) -> &'static str;

    /// Fetches current conditions for `city`.
    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// Entry point that dispatches to the free or keyed provider.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Builds a client whose requests all share `config.timeout_secs`.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| WeatherError::upstream("http", err.to_string()))?;
        Ok(Self { http, config })
    }

    /// Returns the provider `fetch_weather` would use for `api_key`.
    pub fn provider_for(&self, api_key: Option<&str>) -> Box<dyn WeatherProvider> {
        match api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => Box::new(OpenWeatherProvider::new(
                self.http.clone(),
                self.config.openweather_url.clone(),
                key.to_string(),
            )),
            None => Box::new(OpenMeteoProvider::new(
                self.http.clone(),
                self.config.geocoding_url.clone(),
                self.config.forecast_url.clone(),
            )),
        }
    }

    /// Looks up current weather for `city`.
    ///
    /// A present, non-blank `api_key` selects OpenWeatherMap; otherwise
    /// Open-Meteo is used.
    pub async fn fetch_weather(
        &self,
        city: &str,
        api_key: Option<&str>,
    ) -> Result<WeatherReport, WeatherError> {
        let provider = self.provider_for(api_key);
        let started_at = Instant::now();
        debug!(
            "event=weather_fetch module=weather status=start provider={} city_chars={}",
            provider.name(),
            city.chars().count()
        );

        let result = provider.fetch(city).await;
        match &result {
            Ok(_) => debug!(
                "event=weather_fetch module=weather status=ok provider={} duration_ms={}",
                provider.name(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=weather_fetch module=weather status=error provider={} duration_ms={} error={}",
                provider.name(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Sends a request and returns the status with the full body text.
async fn send(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<(StatusCode, String), WeatherError> {
    let response = request
        .send()
        .await
        .map_err(|err| WeatherError::from_transport(provider, err))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| WeatherError::from_transport(provider, err))?;
    Ok((status, body))
}

fn decode_json<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T, WeatherError> {
    serde_json::from_str(body).map_err(|err| {
        WeatherError::upstream(
            provider,
            format!("malformed response ({err}): {}", preview_body(body)),
        )
    })
}

fn status_error(provider: &'static str, status: StatusCode, body: &str) -> WeatherError {
    WeatherError::upstream(
        provider,
        format!("status {status}: {}", preview_body(body)),
    )
}

/// Formats Celsius display text; integral values keep one decimal (`15.0°C`).
pub fn format_celsius(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}°C")
    } else {
        format!("{value}°C")
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_BODY_PREVIEW_CHARS {
        let head: String = trimmed.chars().take(MAX_BODY_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}
