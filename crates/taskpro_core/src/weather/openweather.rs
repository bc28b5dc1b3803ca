//! OpenWeatherMap backend (requires an API key).

use super::{decode_json, format_celsius, send, status_error, WeatherError, WeatherProvider};
use crate::model::weather::WeatherReport;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const PROVIDER: &str = "OpenWeatherMap";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    http: Client,
    url: String,
    api_key: String,
}

// Hand-written so the key never reaches debug output.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(http: Client, url: String, api_key: String) -> Self {
        Self { http, url, api_key }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let request = self.http.get(&self.url).query(&[
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ]);
        let (status, body) = send(PROVIDER, request).await?;

        match status {
            StatusCode::UNAUTHORIZED => return Err(WeatherError::Auth),
            StatusCode::NOT_FOUND => return Err(WeatherError::NotFound(city.to_string())),
            status if !status.is_success() => return Err(status_error(PROVIDER, status, &body)),
            _ => {}
        }

        let parsed: OwCurrentResponse = decode_json(PROVIDER, &body)?;
        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|weather| weather.description)
            .ok_or_else(|| WeatherError::Upstream {
                provider: PROVIDER,
                message: "response has no weather description".to_string(),
            })?;

        Ok(WeatherReport {
            temperature: format_celsius(parsed.main.temp),
            condition: capitalize(&description),
            source: PROVIDER.to_string(),
        })
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("OVERCAST Clouds"), "Overcast clouds");
        assert_eq!(capitalize(""), "");
    }
}
