use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use weatherman::*;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let client = openweather::OpenWeatherClient::new(&app_config.upstream, app_config.api_key())
        .context("building OpenWeather client")?;
    let forecast = Arc::new(forecast::ForecastService::new(
        Arc::new(client),
        app_config.forecast_settings(),
    ));

    let jokes: Option<Arc<dyn jokes::JokeSource>> = match &app_config.jokes {
        Some(jokes_config) => Some(Arc::new(
            jokes::JokeClient::new(jokes_config).context("building joke client")?,
        )),
        None => None,
    };

    tracing::info!(
        utc_offset_seconds = app_config.forecast.utc_offset_seconds,
        weather_days = app_config.forecast.weather_days,
        pollution_days = app_config.forecast.pollution_days,
        jokes = jokes.is_some(),
        "forecast settings"
    );

    let app = routes::app(forecast, jokes, &app_config);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
