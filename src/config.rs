use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::calendar::{Calendar, MAX_OFFSET_SECS};
use crate::forecast::{ForecastSettings, Horizon};

/// Environment variable holding the OpenWeather API key. Overrides `upstream.api_key`.
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Joke decoration for error responses; disabled when the section is absent.
    #[serde(default)]
    pub jokes: Option<JokesConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served as static files for unmatched routes.
    #[serde(default)]
    pub public_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: String,
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,
    /// Per-request timeout for every upstream call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geo_base_url: default_geo_base_url(),
            data_base_url: default_data_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_geo_base_url() -> String {
    "http://api.openweathermap.org/geo/1.0".into()
}

fn default_data_base_url() -> String {
    "http://api.openweathermap.org/data/2.5".into()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Offset (seconds east of UTC) defining calendar days for bucketing and weekday labels.
    #[serde(default)]
    pub utc_offset_seconds: i32,
    /// Days of weather kept after dropping the partial first day.
    #[serde(default = "default_weather_days")]
    pub weather_days: usize,
    /// Days of air pollution kept after dropping the partial first day.
    #[serde(default = "default_pollution_days")]
    pub pollution_days: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: 0,
            weather_days: default_weather_days(),
            pollution_days: default_pollution_days(),
        }
    }
}

fn default_weather_days() -> usize {
    4
}

fn default_pollution_days() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct JokesConfig {
    pub url: String,
    #[serde(default = "default_jokes_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_jokes_timeout_secs() -> u64 {
    3
}

impl AppConfig {
    /// Loads `$CONFIG_FILE` (default `config.toml`) and takes the API key from `$API_KEY`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(path, std::env::var(API_KEY_ENV).ok())
    }

    /// Reads and validates a config file. A non-empty `api_key` overrides the file's value.
    pub fn load_from_path(
        path: impl AsRef<Path>,
        api_key: Option<String>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&s, api_key)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        Self::parse(s, None)
    }

    fn parse(s: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        let mut config: AppConfig = toml::from_str(s)?;
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            config.upstream.api_key = Some(key);
        }
        config.validate()?;
        Ok(config)
    }

    /// The OpenWeather API key. Non-empty once the config is validated.
    pub fn api_key(&self) -> &str {
        self.upstream.api_key.as_deref().unwrap_or_default()
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::from_offset_secs(self.forecast.utc_offset_seconds).unwrap_or_default()
    }

    pub fn forecast_settings(&self) -> ForecastSettings {
        ForecastSettings {
            calendar: self.calendar(),
            weather_horizon: Horizon::new(self.forecast.weather_days),
            pollution_horizon: Horizon::new(self.forecast.pollution_days),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.upstream.geo_base_url.is_empty(),
            "upstream.geo_base_url must be non-empty"
        );
        anyhow::ensure!(
            !self.upstream.data_base_url.is_empty(),
            "upstream.data_base_url must be non-empty"
        );
        anyhow::ensure!(
            self.upstream.timeout_secs > 0,
            "upstream.timeout_secs must be > 0, got {}",
            self.upstream.timeout_secs
        );
        anyhow::ensure!(
            !self.api_key().trim().is_empty(),
            "upstream.api_key must be set (or provide {} in the environment)",
            API_KEY_ENV
        );
        anyhow::ensure!(
            self.forecast.utc_offset_seconds.unsigned_abs() < MAX_OFFSET_SECS.unsigned_abs(),
            "forecast.utc_offset_seconds must be within ±{}, got {}",
            MAX_OFFSET_SECS,
            self.forecast.utc_offset_seconds
        );
        anyhow::ensure!(
            self.forecast.weather_days > 0,
            "forecast.weather_days must be > 0, got {}",
            self.forecast.weather_days
        );
        anyhow::ensure!(
            self.forecast.pollution_days > 0,
            "forecast.pollution_days must be > 0, got {}",
            self.forecast.pollution_days
        );
        if let Some(jokes) = &self.jokes {
            anyhow::ensure!(!jokes.url.is_empty(), "jokes.url must be non-empty");
            anyhow::ensure!(
                jokes.timeout_secs > 0,
                "jokes.timeout_secs must be > 0, got {}",
                jokes.timeout_secs
            );
        }
        Ok(())
    }
}
