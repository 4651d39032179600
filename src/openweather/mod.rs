// OpenWeather client: geocoding, 5-day/3-hour forecast, 5-day/1-hour air pollution forecast.

mod wire;

pub use wire::{parse_geocoding, parse_pollution_forecast, parse_weather_forecast};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::UpstreamConfig;
use crate::error::{UpstreamError, truncate_body};
use crate::models::{Coordinates, PollutionSample, WeatherSample};

/// Source of coordinates and forecast samples for one location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// All geocoder matches for `city`, best first. May be empty.
    async fn geocode(&self, city: &str) -> Result<Vec<Coordinates>, UpstreamError>;

    /// Weather samples in chronological order.
    async fn weather_forecast(
        &self,
        coords: &Coordinates,
    ) -> Result<Vec<WeatherSample>, UpstreamError>;

    /// PM2.5 samples in chronological order.
    async fn pollution_forecast(
        &self,
        coords: &Coordinates,
    ) -> Result<Vec<PollutionSample>, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    geo_base_url: String,
    data_base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            geo_base_url: config.geo_base_url.trim_end_matches('/').to_string(),
            data_base_url: config.data_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn get_text(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<String, UpstreamError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| UpstreamError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        Ok(body)
    }
}

fn coords_query(coords: &Coordinates) -> [(&'static str, String); 2] {
    [("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Vec<Coordinates>, UpstreamError> {
        let url = format!("{}/direct", self.geo_base_url);
        let body = self
            .get_text(
                wire::GEOCODING,
                &url,
                &[("q", city.to_string()), ("limit", "1".to_string())],
            )
            .await?;
        let matches = parse_geocoding(&body)?;
        debug!(matches = matches.len(), "geocoded");
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn weather_forecast(
        &self,
        coords: &Coordinates,
    ) -> Result<Vec<WeatherSample>, UpstreamError> {
        let url = format!("{}/forecast", self.data_base_url);
        let body = self
            .get_text(wire::WEATHER_FORECAST, &url, &coords_query(coords))
            .await?;
        let samples = parse_weather_forecast(&body)?;
        debug!(samples = samples.len(), "weather forecast fetched");
        Ok(samples)
    }

    #[instrument(skip(self))]
    async fn pollution_forecast(
        &self,
        coords: &Coordinates,
    ) -> Result<Vec<PollutionSample>, UpstreamError> {
        let url = format!("{}/air_pollution/forecast", self.data_base_url);
        let body = self
            .get_text(wire::POLLUTION_FORECAST, &url, &coords_query(coords))
            .await?;
        let samples = parse_pollution_forecast(&body)?;
        debug!(samples = samples.len(), "air pollution forecast fetched");
        Ok(samples)
    }
}
