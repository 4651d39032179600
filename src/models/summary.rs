// Per-day summaries produced by the daily aggregator.

use serde::{Deserialize, Serialize};

/// Daily weather: means over the bucket, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDay {
    pub day: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub wind_speed: f64,
    pub rainfall_level: f64,
}

/// Daily PM2.5: rounded mean and unrounded maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionDay {
    pub day: String,
    pub pm2_5: f64,
    pub max_pm2_5: f64,
}
