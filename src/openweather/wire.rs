// OpenWeather JSON bodies and their mapping onto domain samples.

use serde::Deserialize;

use crate::error::UpstreamError;
use crate::models::{Coordinates, PollutionSample, WeatherSample};

pub const GEOCODING: &str = "geocoding";
pub const WEATHER_FORECAST: &str = "weather forecast";
pub const POLLUTION_FORECAST: &str = "air pollution forecast";

#[derive(Debug, Deserialize)]
struct GeoMatch {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastBody {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: ForecastMain,
    wind: ForecastWind,
    #[serde(default)]
    rain: Option<ForecastRain>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastRain {
    #[serde(rename = "3h", default)]
    three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PollutionBody {
    list: Vec<PollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct PollutionEntry {
    dt: i64,
    components: PollutionComponents,
}

#[derive(Debug, Deserialize)]
struct PollutionComponents {
    pm2_5: f64,
}

/// Parses a `/geo/1.0/direct` body. An empty array is valid here; the caller decides.
pub fn parse_geocoding(body: &str) -> Result<Vec<Coordinates>, UpstreamError> {
    let matches: Vec<GeoMatch> = from_body(GEOCODING, body)?;
    Ok(matches
        .into_iter()
        .map(|m| Coordinates {
            lat: m.lat,
            lon: m.lon,
            name: m.name,
        })
        .collect())
}

/// Parses a `/data/2.5/forecast` body (3-hour intervals, Kelvin).
pub fn parse_weather_forecast(body: &str) -> Result<Vec<WeatherSample>, UpstreamError> {
    let parsed: ForecastBody = from_body(WEATHER_FORECAST, body)?;
    Ok(parsed
        .list
        .into_iter()
        .map(|e| WeatherSample {
            time: e.dt,
            temperature: e.main.temp,
            wind_speed: e.wind.speed,
            rainfall_level: e.rain.and_then(|r| r.three_hours),
        })
        .collect())
}

/// Parses a `/data/2.5/air_pollution/forecast` body (1-hour intervals).
pub fn parse_pollution_forecast(body: &str) -> Result<Vec<PollutionSample>, UpstreamError> {
    let parsed: PollutionBody = from_body(POLLUTION_FORECAST, body)?;
    Ok(parsed
        .list
        .into_iter()
        .map(|e| PollutionSample {
            time: e.dt,
            pm2_5: e.components.pm2_5,
        })
        .collect())
}

fn from_body<T: for<'de> Deserialize<'de>>(
    endpoint: &'static str,
    body: &str,
) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|source| UpstreamError::Malformed { endpoint, source })
}
