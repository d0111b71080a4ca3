//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keychain service name under which credentials are stored.
const KEYRING_SERVICE: &str = "reply-bot";

/// How location messages are answered.
///
/// Fixed per deployment; never chosen per request.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMode {
    /// Instantaneous conditions as a plain text reply.
    Current,
    /// Three-day carousel built from the 3-hourly forecast.
    #[default]
    Forecast,
}

/// Messaging platform connectivity.
///
/// Secrets are loaded at runtime via OS keychain or environment variables,
/// never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LineConfig {
    /// Base URL of the messaging API.
    #[serde(default = "default_line_api_base_url")]
    pub api_base_url: String,
    /// Channel secret used to verify webhook signatures (populated at runtime).
    #[serde(skip)]
    pub channel_secret: String,
    /// Channel access token used for reply delivery (populated at runtime).
    #[serde(skip)]
    pub channel_access_token: String,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_line_api_base_url(),
            channel_secret: String::new(),
            channel_access_token: String::new(),
        }
    }
}

/// Weather provider connectivity.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct WeatherConfig {
    /// Base URL of the `OpenWeatherMap` API.
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// API key (populated at runtime).
    #[serde(skip)]
    pub app_id: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            app_id: String::new(),
        }
    }
}

/// Time budgets (seconds) for the blocking upstream calls.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TimeoutConfig {
    /// Weather provider fetch.
    #[serde(default = "default_weather_seconds")]
    pub weather_seconds: u64,
    /// Task store read or write.
    #[serde(default = "default_store_seconds")]
    pub store_seconds: u64,
    /// Outbound reply delivery.
    #[serde(default = "default_reply_seconds")]
    pub reply_seconds: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            weather_seconds: default_weather_seconds(),
            store_seconds: default_store_seconds(),
            reply_seconds: default_reply_seconds(),
        }
    }
}

impl TimeoutConfig {
    /// Weather fetch budget.
    #[must_use]
    pub fn weather(&self) -> Duration {
        Duration::from_secs(self.weather_seconds)
    }

    /// Task store budget.
    #[must_use]
    pub fn store(&self) -> Duration {
        Duration::from_secs(self.store_seconds)
    }

    /// Reply delivery budget.
    #[must_use]
    pub fn reply(&self) -> Duration {
        Duration::from_secs(self.reply_seconds)
    }
}

fn default_line_api_base_url() -> String {
    "https://api.line.me".into()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".into()
}

fn default_weather_seconds() -> u64 {
    10
}

fn default_store_seconds() -> u64 {
    5
}

fn default_reply_seconds() -> u64 {
    10
}

fn default_http_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tasks.db")
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// HTTP port for the webhook listener.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// `SQLite` file backing the task list.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Location reply mode.
    #[serde(default)]
    pub weather_mode: WeatherMode,
    /// Fixed seed for the fortune draw; entropy-seeded when absent.
    #[serde(default)]
    pub fortune_seed: Option<u64>,
    /// Messaging platform settings.
    #[serde(default)]
    pub line: LineConfig,
    /// Weather provider settings.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Upstream call budgets.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load platform and weather credentials from OS keychain with env-var fallback.
    ///
    /// Tries the `reply-bot` keyring service first, then falls back to
    /// `CHANNEL_SECRET` / `CHANNEL_ACCESS_TOKEN` / `APP_ID`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither keychain nor env vars provide
    /// a required credential.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.line.channel_secret = load_credential("channel_secret", "CHANNEL_SECRET").await?;
        self.line.channel_access_token =
            load_credential("channel_access_token", "CHANNEL_ACCESS_TOKEN").await?;
        self.weather.app_id = load_credential("weather_app_id", "APP_ID").await?;
        Ok(())
    }

    /// Apply the `PORT` environment override used by hosted deployments.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is set but not a valid port.
    pub fn apply_port_override(&mut self) -> Result<()> {
        if let Ok(raw) = env::var("PORT") {
            self.http_port = raw
                .trim()
                .parse()
                .map_err(|err| AppError::Config(format!("invalid PORT {raw:?}: {err}")))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let t = &self.timeouts;
        if t.weather_seconds == 0 || t.store_seconds == 0 || t.reply_seconds == 0 {
            return Err(AppError::Config(
                "timeouts must be greater than zero".into(),
            ));
        }

        if self.line.api_base_url.trim().is_empty() {
            return Err(AppError::Config("line.api_base_url must not be empty".into()));
        }

        if self.weather.base_url.trim().is_empty() {
            return Err(AppError::Config(
                "weather.base_url must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    env::var(env_key).map_err(|_| {
        AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))
    })
}
