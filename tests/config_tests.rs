// Config loading and validation tests

use weatherman::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 5500
host = "0.0.0.0"
public_dir = "public"

[upstream]
geo_base_url = "http://api.openweathermap.org/geo/1.0"
data_base_url = "http://api.openweathermap.org/data/2.5"
timeout_secs = 10
api_key = "file-key"

[forecast]
utc_offset_seconds = 3600
weather_days = 4
pollution_days = 5

[jokes]
url = "https://icanhazdadjoke.com/"
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 5500
host = "0.0.0.0"

[upstream]
api_key = "file-key"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 5500);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.public_dir.as_deref(), Some("public"));
    assert_eq!(config.upstream.timeout_secs, 10);
    assert_eq!(config.api_key(), "file-key");
    assert_eq!(config.forecast.utc_offset_seconds, 3600);
    let jokes = config.jokes.as_ref().expect("jokes section");
    assert_eq!(jokes.url, "https://icanhazdadjoke.com/");
    assert_eq!(jokes.timeout_secs, 3);
}

#[test]
fn test_config_defaults() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("load_from_str");
    assert_eq!(
        config.upstream.geo_base_url,
        "http://api.openweathermap.org/geo/1.0"
    );
    assert_eq!(
        config.upstream.data_base_url,
        "http://api.openweathermap.org/data/2.5"
    );
    assert_eq!(config.upstream.timeout_secs, 10);
    assert_eq!(config.forecast.utc_offset_seconds, 0);
    assert_eq!(config.forecast.weather_days, 4);
    assert_eq!(config.forecast.pollution_days, 5);
    assert!(config.server.public_dir.is_none());
    assert!(config.jokes.is_none());
}

#[test]
fn test_forecast_settings_follow_config() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let settings = config.forecast_settings();
    assert_eq!(settings.calendar.offset().local_minus_utc(), 3600);
    assert_eq!(settings.weather_horizon.days, 4);
    assert_eq!(settings.pollution_horizon.days, 5);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 5500", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_missing_api_key() {
    let bad = VALID_CONFIG.replace("api_key = \"file-key\"", "");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("api_key"));
}

#[test]
fn test_config_validation_rejects_blank_api_key() {
    let bad = VALID_CONFIG.replace("api_key = \"file-key\"", "api_key = \"  \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("api_key"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_secs = 10", "timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("upstream.timeout_secs"));
}

#[test]
fn test_config_validation_rejects_empty_base_url() {
    let bad = VALID_CONFIG.replace(
        "data_base_url = \"http://api.openweathermap.org/data/2.5\"",
        "data_base_url = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("data_base_url"));
}

#[test]
fn test_config_validation_rejects_offset_out_of_range() {
    let bad = VALID_CONFIG.replace("utc_offset_seconds = 3600", "utc_offset_seconds = 90000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("utc_offset_seconds"));
}

#[test]
fn test_config_validation_rejects_zero_horizons() {
    let bad = VALID_CONFIG.replace("weather_days = 4", "weather_days = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("weather_days"));

    let bad = VALID_CONFIG.replace("pollution_days = 5", "pollution_days = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("pollution_days"));
}

#[test]
fn test_config_validation_rejects_empty_jokes_url() {
    let bad = VALID_CONFIG.replace(
        "url = \"https://icanhazdadjoke.com/\"",
        "url = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("jokes.url"));
}

#[test]
fn test_config_rejects_missing_server_section() {
    assert!(AppConfig::load_from_str("[upstream]\napi_key = \"k\"\n").is_err());
}

#[test]
fn test_config_load_from_path_env_key_overrides_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();

    let config = AppConfig::load_from_path(&path, Some("env-key".into())).unwrap();
    assert_eq!(config.api_key(), "env-key");

    let config = AppConfig::load_from_path(&path, Some(String::new())).unwrap();
    assert_eq!(config.api_key(), "file-key");
}

#[test]
fn test_config_load_from_path_key_only_from_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = 5500\nhost = \"0.0.0.0\"\n").unwrap();

    assert!(AppConfig::load_from_path(&path, None).is_err());
    let config = AppConfig::load_from_path(&path, Some("env-key".into())).unwrap();
    assert_eq!(config.api_key(), "env-key");
}

#[test]
fn test_config_load_from_missing_path_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = AppConfig::load_from_path(dir.path().join("nope.toml"), None).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}
