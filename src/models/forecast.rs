use serde::{Deserialize, Serialize};

use super::{PollutionDay, WeatherDay};

/// Geocoded location. Created once per request and shared read-only by both fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of a successful `GET /weather/{city}`.
/// `weather` and `air_pollution` are aggregated independently; days are not index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub weather: Vec<WeatherDay>,
    pub air_pollution: Vec<PollutionDay>,
}
