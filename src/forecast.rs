// Forecast assembly: aggregate weather and pollution independently, trim each to its horizon,
// and combine them for one location. ForecastService adds geocoding and fetching.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::aggregation::{PollutionReducer, WeatherReducer, aggregate};
use crate::calendar::Calendar;
use crate::error::ForecastError;
use crate::models::{ForecastResponse, PollutionSample, WeatherSample};
use crate::openweather::WeatherSource;

/// Drop the leading partial day, then keep at most `days` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub days: usize,
}

impl Horizon {
    pub const fn new(days: usize) -> Self {
        Self { days }
    }

    /// The leading day is today, already in progress, so it is never complete.
    pub fn apply<T>(&self, days: Vec<T>) -> Vec<T> {
        days.into_iter().skip(1).take(self.days).collect()
    }
}

/// Calendar and horizons shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct ForecastSettings {
    pub calendar: Calendar,
    pub weather_horizon: Horizon,
    pub pollution_horizon: Horizon,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            calendar: Calendar::utc(),
            weather_horizon: Horizon::new(4),
            pollution_horizon: Horizon::new(5),
        }
    }
}

/// Aggregates both sample streams into daily summaries and trims them to their horizons.
pub fn build_forecast(
    city: Option<String>,
    weather_samples: &[WeatherSample],
    pollution_samples: &[PollutionSample],
    settings: &ForecastSettings,
) -> ForecastResponse {
    let weather = aggregate(weather_samples, &settings.calendar, &WeatherReducer);
    let air_pollution = aggregate(pollution_samples, &settings.calendar, &PollutionReducer);
    debug!(
        weather_days = weather.len(),
        pollution_days = air_pollution.len(),
        "aggregated samples into days"
    );

    ForecastResponse {
        city,
        weather: settings.weather_horizon.apply(weather),
        air_pollution: settings.pollution_horizon.apply(air_pollution),
    }
}

/// Geocode -> fetch weather and pollution concurrently -> assemble. All or nothing.
pub struct ForecastService {
    source: Arc<dyn WeatherSource>,
    settings: ForecastSettings,
}

impl ForecastService {
    pub fn new(source: Arc<dyn WeatherSource>, settings: ForecastSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    #[instrument(skip(self))]
    pub async fn forecast(&self, city: &str) -> Result<ForecastResponse, ForecastError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ForecastError::InvalidCity(city.to_string()));
        }

        let coords = self
            .source
            .geocode(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ForecastError::UnknownCity(city.to_string()))?;
        info!(lat = coords.lat, lon = coords.lon, "resolved {}", city);

        let (weather, pollution) = tokio::try_join!(
            self.source.weather_forecast(&coords),
            self.source.pollution_forecast(&coords),
        )?;

        Ok(build_forecast(
            coords.name,
            &weather,
            &pollution,
            &self.settings,
        ))
    }
}
