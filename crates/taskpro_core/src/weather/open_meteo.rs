//! Open-Meteo backend (free, no key): geocode the city, then read current
//! conditions at its coordinates.

use super::{decode_json, format_celsius, send, status_error, WeatherError, WeatherProvider};
use crate::model::weather::WeatherReport;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "Open-Meteo";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new(http: Client, geocoding_url: String, forecast_url: String) -> Self {
        Self {
            http,
            geocoding_url,
            forecast_url,
        }
    }

    async fn geocode(&self, city: &str) -> Result<GeoResult, WeatherError> {
        let request = self.http.get(&self.geocoding_url).query(&[
            ("name", city),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);
        let (status, body) = send(PROVIDER, request).await?;
        if !status.is_success() {
            return Err(status_error(PROVIDER, status, &body));
        }

        let parsed: GeoResponse = decode_json(PROVIDER, &body)?;
        parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))
    }

    async fn current(&self, location: &GeoResult) -> Result<CurrentWeather, WeatherError> {
        let request = self.http.get(&self.forecast_url).query(&[
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current_weather", "true".to_string()),
        ]);
        let (status, body) = send(PROVIDER, request).await?;
        if !status.is_success() {
            return Err(status_error(PROVIDER, status, &body));
        }

        let parsed: ForecastResponse = decode_json(PROVIDER, &body)?;
        parsed.current_weather.ok_or_else(|| WeatherError::Upstream {
            provider: PROVIDER,
            message: "response has no current_weather block".to_string(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let location = self.geocode(city).await?;
        let current = self.current(&location).await?;

        Ok(WeatherReport {
            temperature: format_celsius(current.temperature),
            condition: describe_weather_code(current.weathercode).to_string(),
            source: PROVIDER.to_string(),
        })
    }
}

/// Maps a WMO weather code to a short condition label.
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        61 | 63 | 65 => "Rain",
        71 | 73 | 75 => "Snow",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i64,
}

#[cfg(test)]
mod tests {
    use super::describe_weather_code;

    #[test]
    fn weather_codes_map_to_buckets() {
        assert_eq!(describe_weather_code(0), "Clear sky");
        assert_eq!(describe_weather_code(3), "Partly cloudy");
        assert_eq!(describe_weather_code(48), "Fog");
        assert_eq!(describe_weather_code(53), "Drizzle");
        assert_eq!(describe_weather_code(65), "Rain");
        assert_eq!(describe_weather_code(71), "Snow");
        assert_eq!(describe_weather_code(99), "Thunderstorm");
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        for code in [4, 44, 52, 80, 200, -1] {
            assert_eq!(describe_weather_code(code), "Unknown", "code {code}");
        }
    }
}
