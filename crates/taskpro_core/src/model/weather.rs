//! Weather lookup results and query history records.

use serde::{Deserialize, Serialize};

/// Store-assigned weather log identifier.
pub type WeatherLogId = i64;

/// Normalized weather result, independent of the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display text with unit suffix, e.g. `21.3°C`.
    pub temperature: String,
    pub condition: String,
    /// Provider name, e.g. `Open-Meteo`.
    pub source: String,
}

/// One persisted weather query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherLog {
    pub id: WeatherLogId,
    /// City exactly as the user typed it.
    pub city: String,
    pub temperature: String,
    pub condition: String,
    /// Unix epoch milliseconds, set by the store.
    pub timestamp: i64,
}
