// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::forecast::ForecastService;
use crate::jokes::JokeSource;

/// Liveness text for `GET /`.
pub const LIVENESS_TEXT: &str = "WeatherMan running...";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) forecast: Arc<ForecastService>,
    pub(crate) jokes: Option<Arc<dyn JokeSource>>,
}

pub fn app(
    forecast: Arc<ForecastService>,
    jokes: Option<Arc<dyn JokeSource>>,
    config: &AppConfig,
) -> Router {
    let state = AppState { forecast, jokes };
    let router = Router::new()
        .route("/", get(|| async { LIVENESS_TEXT })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/weather", get(http::missing_city_handler)) // GET /weather
        .route("/weather/", get(http::missing_city_handler)) // GET /weather/
        .route("/weather/{city}", get(http::forecast_handler)) // GET /weather/{city}
        .route("/weather/{city}/", get(http::forecast_handler)); // GET /weather/{city}/

    let router = match &config.server.public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
