//! Weather enrichment: turn a location and a date into a single forecast
//! sample.
//!
//! Lookups are best effort. A failing or empty provider yields `None` and a
//! warning in the log; callers omit that location rather than failing the
//! edit that asked for it.

mod openweathermap;

pub use openweathermap::OpenWeatherMap;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::dates::local_noon;
use crate::error::{DuoplanError, DuoplanResult};
use crate::model::WeatherSample;

/// One point of a provider's forecast series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    /// Degrees Fahrenheit, unrounded.
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Source of forecast series, keyed by free-text location.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn forecast_series(&self, location: &str) -> DuoplanResult<Vec<ForecastPoint>>;
}

/// Provider used when no weather API key is configured.
pub struct NoForecasts;

#[async_trait]
impl ForecastProvider for NoForecasts {
    async fn forecast_series(&self, _location: &str) -> DuoplanResult<Vec<ForecastPoint>> {
        Err(DuoplanError::Provider(
            "No weather API key configured".into(),
        ))
    }
}

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn ForecastProvider>,
    timezone: Tz,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn ForecastProvider>, timezone: Tz) -> Self {
        WeatherService { provider, timezone }
    }

    /// Forecast for `location` nearest to local noon on `date`. The sample is
    /// never primary; primacy is decided by the day it lands on.
    pub async fn forecast_for(&self, location: &str, date: NaiveDate) -> Option<WeatherSample> {
        let series = match self.provider.forecast_series(location).await {
            Ok(series) => series,
            Err(e) => {
                warn!(location, error = %e, "weather unavailable");
                return None;
            }
        };

        let target = local_noon(date, self.timezone);
        let Some(point) = closest_to(&series, target) else {
            warn!(location, "weather provider returned an empty series");
            return None;
        };

        debug!(location, %date, at = %point.time, "picked forecast point");

        Some(WeatherSample {
            location: location.to_string(),
            temperature: point.temperature.round() as i32,
            description: point.description.clone(),
            icon: point.icon.clone(),
            is_primary: false,
        })
    }

    /// Fetch several locations concurrently. Unavailable locations are
    /// dropped; the rest keep the order of `locations`.
    pub async fn forecast_many(&self, locations: &[String], date: NaiveDate) -> Vec<WeatherSample> {
        join_all(locations.iter().map(|l| self.forecast_for(l, date)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

/// The point whose timestamp is nearest `target`. Ties go to the earlier
/// point in the series.
pub fn closest_to(series: &[ForecastPoint], target: DateTime<Utc>) -> Option<&ForecastPoint> {
    series
        .iter()
        .min_by_key(|point| (point.time - target).num_seconds().abs())
}
