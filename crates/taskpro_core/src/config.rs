//! Application configuration.
//!
//! # Responsibility
//! - Load settings from a TOML file in the platform config directory.
//! - Apply environment overrides on top of file values.
//!
//! # Invariants
//! - A missing config file is not an error; defaults apply.
//! - Environment values win over file values; blank env values are ignored.
//!
//! Example:
//! ```toml
//! database_path = "/home/me/.local/share/taskpro/taskpro.sqlite3"
//! log_level = "info"
//!
//! [weather]
//! timeout_secs = 5
//! api_key = "..."
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "taskpro.sqlite3";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_DB_PATH: &str = "TASKPRO_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TASKPRO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKPRO_LOG_DIR";
pub const ENV_OPENWEATHER_API_KEY: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug)]
pub enum ConfigError {
    NoProjectDirs,
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProjectDirs => write!(f, "could not determine platform config directory"),
            Self::Read { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoProjectDirs => None,
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Weather provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Per-request timeout for every provider call.
    pub timeout_secs: u64,
    /// Default key for the keyed provider; callers may still pass their own.
    pub api_key: Option<String>,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub openweather_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_WEATHER_TIMEOUT_SECS,
            api_key: None,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            openweather_url: DEFAULT_OPENWEATHER_URL.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Loads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_file_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads one TOML file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from a key lookup (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(path) = value(ENV_DB_PATH) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = value(ENV_OPENWEATHER_API_KEY) {
            self.weather.api_key = Some(key);
        }
    }

    /// Database file path, falling back to the platform data directory.
    pub fn resolved_database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DB_FILE_NAME)),
        }
    }

    /// Log directory, falling back to the platform data directory.
    pub fn resolved_log_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("logs")),
        }
    }

    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("dev", "taskpro", "taskpro").ok_or(ConfigError::NoProjectDirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.weather.timeout_secs, DEFAULT_WEATHER_TIMEOUT_SECS);
    }

    #[test]
    fn partial_file_keeps_weather_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "database_path = \"/tmp/tasks.db\"\n[weather]\ntimeout_secs = 9\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/tasks.db")));
        assert_eq!(config.weather.timeout_secs, 9);
        assert_eq!(config.weather.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(config.weather.api_key, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_path = [").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_win_and_blank_values_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/data/override.db"),
            (ENV_OPENWEATHER_API_KEY, "  key-123 "),
            (ENV_LOG_LEVEL, "   "),
        ]);
        let mut config = AppConfig {
            log_level: Some("warn".to_string()),
            ..AppConfig::default()
        };

        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(
            config.database_path,
            Some(PathBuf::from("/data/override.db"))
        );
        assert_eq!(config.weather.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }
}
