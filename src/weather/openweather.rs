//! `OpenWeatherMap` HTTP client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::WeatherConfig;
use crate::models::forecast::{CurrentConditions, ForecastSample};
use crate::{AppError, Result};

use super::WeatherGateway;

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(default)]
    main: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    weather: Vec<Condition>,
    main: CurrentMain,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    main: ForecastMain,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

/// Client for the `OpenWeatherMap` 2.5 API.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
}

impl OpenWeatherClient {
    /// Build a client from configuration.
    ///
    /// `timeout` bounds each request end to end.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Weather` if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            app_id: config.app_id.clone(),
        })
    }

    fn url(&self, endpoint: &str, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/data/2.5/{endpoint}?{}&appid={}",
            self.base_url,
            coordinate_query(latitude, longitude),
            self.app_id
        )
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Weather(format!("provider returned {status}")));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| AppError::Weather(format!("invalid provider response: {err}")))
    }

    /// Fetch current conditions.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Weather` on network, status, or decode failure,
    /// or when the response carries no condition entry.
    pub async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        debug!(latitude, longitude, "fetching current weather");
        let data: CurrentResponse = self
            .get_json(&self.url("weather", latitude, longitude))
            .await?;
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Weather("response has no weather entry".into()))?;

        Ok(CurrentConditions {
            condition: condition.main,
            temp_kelvin: data.main.temp,
            humidity: data.main.humidity,
        })
    }

    /// Fetch the 3-hourly forecast series.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Weather` on network, status, or decode failure,
    /// or when an entry carries no condition.
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastSample>> {
        debug!(latitude, longitude, "fetching forecast");
        let data: ForecastResponse = self
            .get_json(&self.url("forecast", latitude, longitude))
            .await?;

        data.list
            .into_iter()
            .enumerate()
            .map(|(offset, entry)| {
                let icon = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|c| c.icon)
                    .ok_or_else(|| {
                        AppError::Weather(format!("forecast entry {offset} has no weather"))
                    })?;
                Ok(ForecastSample {
                    offset,
                    temp_min: entry.main.temp_min,
                    temp_max: entry.main.temp_max,
                    humidity: entry.main.humidity,
                    icon,
                })
            })
            .collect()
    }
}

impl WeatherGateway for OpenWeatherClient {
    fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Pin<Box<dyn Future<Output = Result<CurrentConditions>> + Send + '_>> {
        Box::pin(self.fetch_current(latitude, longitude))
    }

    fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ForecastSample>>> + Send + '_>> {
        Box::pin(self.fetch_forecast(latitude, longitude))
    }
}

/// Render `lat`/`lon` query parameters with six decimal places.
fn coordinate_query(latitude: f64, longitude: f64) -> String {
    format!("lat={latitude:.6}&lon={longitude:.6}")
}
