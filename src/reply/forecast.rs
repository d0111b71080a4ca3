//! Forecast aggregation into day buckets.
//!
//! The provider returns samples every 3 hours, so one day is 8 samples.
//! The first 24 samples are folded into today, tomorrow, and the day
//! after. Temperatures are converted and truncated to whole degrees
//! before the min/max reduction.

use crate::models::forecast::{DayBucket, ForecastSample};
use crate::weather::kelvin_to_celsius;
use crate::{AppError, Result};

/// Samples per day at 3-hour resolution.
pub const SAMPLES_PER_DAY: usize = 8;

/// Number of day buckets produced.
pub const DAYS: usize = 3;

/// Minimum series length accepted by [`aggregate`].
pub const REQUIRED_SAMPLES: usize = SAMPLES_PER_DAY * DAYS;

#[allow(clippy::cast_possible_truncation)]
fn whole_celsius(kelvin: f64) -> i32 {
    kelvin_to_celsius(kelvin).floor() as i32
}

/// Reduce a forecast series into three day buckets.
///
/// Only the first [`REQUIRED_SAMPLES`] samples are read; anything beyond
/// is ignored.
///
/// # Errors
///
/// Returns `AppError::Forecast` when fewer than [`REQUIRED_SAMPLES`]
/// samples are supplied. The series is never truncated to fit.
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(samples: &[ForecastSample]) -> Result<[DayBucket; DAYS]> {
    if samples.len() < REQUIRED_SAMPLES {
        return Err(AppError::Forecast(format!(
            "need {REQUIRED_SAMPLES} samples, got {}",
            samples.len()
        )));
    }

    let mut max_temp = [i32::MIN; DAYS];
    let mut min_temp = [i32::MAX; DAYS];
    let mut humidity = [0.0_f64; DAYS];

    for (i, sample) in samples[..REQUIRED_SAMPLES].iter().enumerate() {
        let day = i / SAMPLES_PER_DAY;
        max_temp[day] = max_temp[day].max(whole_celsius(sample.temp_max));
        min_temp[day] = min_temp[day].min(whole_celsius(sample.temp_min));
        humidity[day] += sample.humidity;
    }

    Ok(std::array::from_fn(|day| DayBucket {
        max_temp: max_temp[day],
        min_temp: min_temp[day],
        avg_humidity: humidity[day] / SAMPLES_PER_DAY as f64,
        icon: samples[day * SAMPLES_PER_DAY].icon.clone(),
    }))
}
