//! Weather data models.

use serde::{Deserialize, Serialize};

/// One 3-hourly sample of a forecast series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSample {
    /// Position in the series (0-based, 3 hours apart).
    pub offset: usize,
    /// Minimum temperature in Kelvin.
    pub temp_min: f64,
    /// Maximum temperature in Kelvin.
    pub temp_max: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Provider condition icon code (e.g. `10d`).
    pub icon: String,
}

/// Aggregated summary for one day of the forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayBucket {
    /// Highest temperature of the day, whole degrees Celsius.
    pub max_temp: i32,
    /// Lowest temperature of the day, whole degrees Celsius.
    pub min_temp: i32,
    /// Mean relative humidity in percent.
    pub avg_humidity: f64,
    /// Icon of the first sample in the day.
    pub icon: String,
}

/// Instantaneous conditions at a coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// Condition label (e.g. `Clouds`).
    pub condition: String,
    /// Temperature in Kelvin.
    pub temp_kelvin: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}
