//! OpenWeatherMap 5-day / 3-hour forecast client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::error::{DuoplanError, DuoplanResult};
use crate::weather::{ForecastPoint, ForecastProvider};

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMap {
    pub fn new(api_key: &str, timeout: Duration) -> DuoplanResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DuoplanError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(OpenWeatherMap {
            client,
            api_key: api_key.to_string(),
            base_url: FORECAST_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (e.g. a proxy).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherMap {
    async fn forecast_series(&self, location: &str) -> DuoplanResult<Vec<ForecastPoint>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await
            .map_err(|e| DuoplanError::Provider(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DuoplanError::Provider(format!(
                "Weather API error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DuoplanError::Provider(format!("Failed to read weather response: {}", e)))?;

        parse_forecast(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

fn parse_forecast(body: &str) -> DuoplanResult<Vec<ForecastPoint>> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| DuoplanError::Provider(format!("Failed to parse weather response: {}", e)))?;

    let points = response
        .list
        .into_iter()
        .filter_map(|entry| {
            let time = DateTime::from_timestamp(entry.dt, 0)?;
            let (description, icon) = entry
                .weather
                .into_iter()
                .next()
                .map(|c| (c.description, c.icon))
                .unwrap_or_default();

            Some(ForecastPoint {
                time,
                temperature: entry.main.temp,
                description,
                icon,
            })
        })
        .collect();

    Ok(points)
}
