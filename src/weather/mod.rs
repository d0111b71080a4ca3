//! Weather provider gateway.

use std::future::Future;
use std::pin::Pin;

use crate::models::forecast::{CurrentConditions, ForecastSample};
use crate::Result;

pub mod openweather;

/// Offset between 0 °C and 0 K.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert a Kelvin reading to degrees Celsius.
#[must_use]
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// Source of weather data for a coordinate pair.
pub trait WeatherGateway: Send + Sync {
    /// Instantaneous conditions at `(latitude, longitude)`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Weather` on network, status, or decode failure.
    fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Pin<Box<dyn Future<Output = Result<CurrentConditions>> + Send + '_>>;

    /// 3-hourly forecast series at `(latitude, longitude)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Weather` on network, status, or decode failure.
    fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ForecastSample>>> + Send + '_>>;
}
