// Optional filler content for error responses. Failures are logged and swallowed.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::JokesConfig;
use crate::error::{UpstreamError, truncate_body};

const JOKES: &str = "jokes";

#[async_trait]
pub trait JokeSource: Send + Sync {
    /// One joke, or None if the source is unavailable.
    async fn joke(&self) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct JokeBody {
    joke: String,
}

/// Client for JSON joke APIs answering `{"joke": "..."}` (e.g. icanhazdadjoke.com).
#[derive(Debug, Clone)]
pub struct JokeClient {
    http: Client,
    url: String,
}

impl JokeClient {
    pub fn new(config: &JokesConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    async fn fetch(&self) -> Result<String, UpstreamError> {
        let res = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                endpoint: JOKES,
                source,
            })?;
        let status = res.status();
        let body = res.text().await.map_err(|source| UpstreamError::Transport {
            endpoint: JOKES,
            source,
        })?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint: JOKES,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }
        parse_joke(&body)
    }
}

#[async_trait]
impl JokeSource for JokeClient {
    async fn joke(&self) -> Option<String> {
        match self.fetch().await {
            Ok(joke) => Some(joke),
            Err(e) => {
                debug!("joke unavailable: {}", e);
                None
            }
        }
    }
}

pub fn parse_joke(body: &str) -> Result<String, UpstreamError> {
    let parsed: JokeBody = serde_json::from_str(body).map_err(|source| UpstreamError::Malformed {
        endpoint: JOKES,
        source,
    })?;
    Ok(parsed.joke)
}
