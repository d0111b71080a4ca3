//! Unit tests for configuration parsing, validation, and env overrides.

use std::io::Write;

use reply_bot::config::{GlobalConfig, WeatherMode};
use reply_bot::AppError;

fn sample_toml() -> &'static str {
    r#"
http_port = 9000
db_path = "data/tasks.db"
weather_mode = "current"
fortune_seed = 7

[line]
api_base_url = "http://localhost:9999"

[weather]
base_url = "http://localhost:9998"

[timeouts]
weather_seconds = 3
store_seconds = 2
reply_seconds = 4
"#
}

#[test]
fn full_config_parses() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("config parses");
    assert_eq!(config.http_port, 9000);
    assert_eq!(config.db_path.to_str(), Some("data/tasks.db"));
    assert_eq!(config.weather_mode, WeatherMode::Current);
    assert_eq!(config.fortune_seed, Some(7));
    assert_eq!(config.line.api_base_url, "http://localhost:9999");
    assert_eq!(config.weather.base_url, "http://localhost:9998");
    assert_eq!(config.timeouts.weather_seconds, 3);
    assert_eq!(config.timeouts.store().as_secs(), 2);
    assert_eq!(config.timeouts.reply().as_secs(), 4);
}

#[test]
fn empty_config_uses_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("defaults are valid");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.db_path.to_str(), Some("tasks.db"));
    assert_eq!(config.weather_mode, WeatherMode::Forecast);
    assert_eq!(config.fortune_seed, None);
    assert_eq!(config.line.api_base_url, "https://api.line.me");
    assert_eq!(config.weather.base_url, "https://api.openweathermap.org");
    assert_eq!(config.timeouts.weather_seconds, 10);
    assert_eq!(config.timeouts.store_seconds, 5);
    assert_eq!(config.timeouts.reply_seconds, 10);
}

#[test]
fn credentials_are_not_read_from_toml() {
    let raw = r#"
[line]
channel_secret = "leaked"
channel_access_token = "leaked"
"#;
    let config = GlobalConfig::from_toml_str(raw).expect("config parses");
    assert!(config.line.channel_secret.is_empty());
    assert!(config.line.channel_access_token.is_empty());
}

#[test]
fn zero_timeout_is_rejected() {
    let raw = "[timeouts]\nstore_seconds = 0\n";
    let err = GlobalConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("timeouts")));
}

#[test]
fn empty_weather_base_url_is_rejected() {
    let raw = "[weather]\nbase_url = \"  \"\n";
    let err = GlobalConfig::from_toml_str(raw).unwrap_err();
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("weather.base_url")));
}

#[test]
fn empty_line_base_url_is_rejected() {
    let raw = "[line]\napi_base_url = \"\"\n";
    assert!(matches!(
        GlobalConfig::from_toml_str(raw),
        Err(AppError::Config(_))
    ));
}

#[test]
fn unknown_weather_mode_is_rejected() {
    let err = GlobalConfig::from_toml_str("weather_mode = \"hourly\"").unwrap_err();
    assert!(err.to_string().starts_with("config: invalid config"));
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(sample_toml().as_bytes()).expect("write");
    let config = GlobalConfig::load_from_path(file.path()).expect("load");
    assert_eq!(config.http_port, 9000);
}

#[test]
fn load_from_missing_path_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let err = GlobalConfig::load_from_path(temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("failed to read config")));
}

#[test]
#[serial_test::serial]
fn port_env_overrides_config() {
    let mut config = GlobalConfig::from_toml_str(sample_toml()).expect("config");
    std::env::set_var("PORT", "5123");
    let result = config.apply_port_override();
    std::env::remove_var("PORT");
    result.expect("override applies");
    assert_eq!(config.http_port, 5123);
}

#[test]
#[serial_test::serial]
fn invalid_port_env_is_rejected() {
    let mut config = GlobalConfig::from_toml_str(sample_toml()).expect("config");
    std::env::set_var("PORT", "not-a-port");
    let result = config.apply_port_override();
    std::env::remove_var("PORT");
    assert!(matches!(result, Err(AppError::Config(_))));
    assert_eq!(config.http_port, 9000);
}

#[test]
#[serial_test::serial]
fn absent_port_env_keeps_config() {
    std::env::remove_var("PORT");
    let mut config = GlobalConfig::from_toml_str(sample_toml()).expect("config");
    config.apply_port_override().expect("no-op");
    assert_eq!(config.http_port, 9000);
}

/// Env-var fallback when the keychain has no entries for this service.
#[tokio::test]
#[serial_test::serial]
async fn credentials_fall_back_to_env_vars() {
    let mut config = GlobalConfig::from_toml_str("").expect("config");
    std::env::set_var("CHANNEL_SECRET", "secret-from-env");
    std::env::set_var("CHANNEL_ACCESS_TOKEN", "token-from-env");
    std::env::set_var("APP_ID", "appid-from-env");

    let result = config.load_credentials().await;

    std::env::remove_var("CHANNEL_SECRET");
    std::env::remove_var("CHANNEL_ACCESS_TOKEN");
    std::env::remove_var("APP_ID");

    result.expect("credentials load");
    assert_eq!(config.line.channel_secret, "secret-from-env");
    assert_eq!(config.line.channel_access_token, "token-from-env");
    assert_eq!(config.weather.app_id, "appid-from-env");
}

#[tokio::test]
#[serial_test::serial]
async fn missing_credential_names_env_var() {
    let mut config = GlobalConfig::from_toml_str("").expect("config");
    std::env::remove_var("CHANNEL_SECRET");

    let err = config.load_credentials().await.unwrap_err();
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("CHANNEL_SECRET")));
}
