// Raw samples as delivered by the upstream forecast streams.

use serde::{Deserialize, Serialize};

/// Anything carrying a UNIX timestamp (seconds) that can be bucketed by day.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// One 3-hour weather interval. Temperature is in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    pub time: i64,
    pub temperature: f64,
    pub wind_speed: f64,
    /// Absent when no precipitation was recorded for the interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall_level: Option<f64>,
}

/// One 1-hour air pollution interval (PM2.5 in µg/m³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionSample {
    pub time: i64,
    pub pm2_5: f64,
}

impl Timestamped for WeatherSample {
    fn timestamp(&self) -> i64 {
        self.time
    }
}

impl Timestamped for PollutionSample {
    fn timestamp(&self) -> i64 {
        self.time
    }
}
