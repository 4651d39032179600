// GET handlers: version, weather/{city}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, warn};

use super::AppState;

/// Client-visible message for every failed forecast request.
pub const BAD_REQUEST_MESSAGE: &str = "Bad Request.";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    joke: Option<String>,
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /weather and /weather/: no city given.
pub(super) async fn missing_city_handler(State(state): State<AppState>) -> Response {
    bad_request(&state).await
}

/// GET /weather/{city}: daily weather and air pollution for the city, or 400.
pub(super) async fn forecast_handler(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Response {
    info!("Request received for {}", city);
    match state.forecast.forecast(&city).await {
        Ok(forecast) => (StatusCode::OK, Json(forecast)).into_response(),
        Err(e) => {
            warn!("forecast for {:?} failed: {}", city, e);
            bad_request(&state).await
        }
    }
}

async fn bad_request(state: &AppState) -> Response {
    let joke = match &state.jokes {
        Some(jokes) => jokes.joke().await,
        None => None,
    };
    let body = ErrorBody {
        error: BAD_REQUEST_MESSAGE,
        joke,
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
