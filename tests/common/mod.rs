// Shared test helpers: sample builders and stub upstream sources

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use weatherman::error::UpstreamError;
use weatherman::jokes::JokeSource;
use weatherman::models::*;
use weatherman::openweather::WeatherSource;

/// 2024-01-01T00:00:00Z, a Monday.
pub const JAN_1_2024: i64 = 1_704_067_200;
pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;

pub fn weather(time: i64, temperature: f64, wind_speed: f64, rain: Option<f64>) -> WeatherSample {
    WeatherSample {
        time,
        temperature,
        wind_speed,
        rainfall_level: rain,
    }
}

pub fn pollution(time: i64, pm2_5: f64) -> PollutionSample {
    PollutionSample { time, pm2_5 }
}

/// `count` weather samples every 3 hours from `start`, all at 283.15 K, wind 2.0, no rain.
pub fn weather_stream(start: i64, count: usize) -> Vec<WeatherSample> {
    (0..count as i64)
        .map(|i| weather(start + i * 3 * HOUR, 283.15, 2.0, None))
        .collect()
}

/// `count` pollution samples every hour from `start`, PM2.5 = 10.0.
pub fn pollution_stream(start: i64, count: usize) -> Vec<PollutionSample> {
    (0..count as i64)
        .map(|i| pollution(start + i * HOUR, 10.0))
        .collect()
}

pub fn paris() -> Coordinates {
    Coordinates {
        lat: 48.8589,
        lon: 2.32,
        name: Some("Paris".into()),
    }
}

/// Canned upstream responses. Counts forecast fetches.
#[derive(Default)]
pub struct StubSource {
    pub matches: Vec<Coordinates>,
    pub weather: Vec<WeatherSample>,
    pub pollution: Vec<PollutionSample>,
    pub fail_pollution: bool,
    pub forecast_calls: AtomicUsize,
}

impl StubSource {
    /// Paris with a 5-day/3-hour and 5-day/1-hour stream starting Monday 15:00 UTC.
    pub fn paris_five_days() -> Self {
        Self {
            matches: vec![paris()],
            weather: weather_stream(JAN_1_2024 + 15 * HOUR, 40),
            pollution: pollution_stream(JAN_1_2024 + 15 * HOUR, 120),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherSource for StubSource {
    async fn geocode(&self, _city: &str) -> Result<Vec<Coordinates>, UpstreamError> {
        Ok(self.matches.clone())
    }

    async fn weather_forecast(
        &self,
        _coords: &Coordinates,
    ) -> Result<Vec<WeatherSample>, UpstreamError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.weather.clone())
    }

    async fn pollution_forecast(
        &self,
        _coords: &Coordinates,
    ) -> Result<Vec<PollutionSample>, UpstreamError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pollution {
            return Err(UpstreamError::Status {
                endpoint: "air pollution forecast",
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(self.pollution.clone())
    }
}

pub struct StubJokes(pub &'static str);

#[async_trait]
impl JokeSource for StubJokes {
    async fn joke(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

pub fn stub_jokes(joke: &'static str) -> Option<Arc<dyn JokeSource>> {
    Some(Arc::new(StubJokes(joke)))
}
