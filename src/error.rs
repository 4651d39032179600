// Error types for upstream calls and forecast assembly. The HTTP layer maps all of them to 400.

use thiserror::Error;

/// Failure talking to an upstream API (OpenWeather, jokes).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("malformed {endpoint} response: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a forecast could not be produced for a city.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid city name {0:?}")]
    InvalidCity(String),

    #[error("no geocoding match for {0:?}")]
    UnknownCity(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Max number of body bytes carried into an error (and thus into logs).
pub const MAX_ERROR_BODY: usize = 200;

/// Cuts an upstream response body to `MAX_ERROR_BODY` bytes on a char boundary.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
