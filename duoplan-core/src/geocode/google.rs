//! Google Maps Geocoding API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{DuoplanError, DuoplanResult};
use crate::geocode::GeocodeProvider;
use crate::model::{Coordinates, PlacedLocation};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: &str, timeout: Duration) -> DuoplanResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DuoplanError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GoogleGeocoder {
            client,
            api_key: api_key.to_string(),
        })
    }

    async fn request(&self, param: (&str, &str)) -> DuoplanResult<Option<PlacedLocation>> {
        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[param, ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| DuoplanError::Provider(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DuoplanError::Provider(format!(
                "Geocoding API error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DuoplanError::Provider(format!("Failed to read geocoding response: {}", e)))?;

        parse_geocode(&body)
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocoder {
    async fn lookup_address(&self, address: &str) -> DuoplanResult<Option<PlacedLocation>> {
        self.request(("address", address)).await
    }

    async fn lookup_coordinates(&self, at: Coordinates) -> DuoplanResult<Option<PlacedLocation>> {
        let latlng = format!("{},{}", at.lat, at.lng);
        let mut found = self.request(("latlng", latlng.as_str())).await?;

        // Keep the clicked point rather than the matched building's centroid
        if let Some(place) = found.as_mut() {
            place.coordinates = at;
        }
        Ok(found)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    #[serde(default)]
    place_id: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

fn parse_geocode(body: &str) -> DuoplanResult<Option<PlacedLocation>> {
    let response: GeocodeResponse = serde_json::from_str(body)
        .map_err(|e| DuoplanError::Provider(format!("Failed to parse geocoding response: {}", e)))?;

    match response.status.as_str() {
        "OK" => Ok(response.results.into_iter().next().map(|r| PlacedLocation {
            address: r.formatted_address,
            coordinates: r.geometry.location,
            place_id: r.place_id,
        })),
        "ZERO_RESULTS" => Ok(None),
        status => Err(DuoplanError::Provider(format!(
            "Geocoding status {}: {}",
            status,
            response.error_message.unwrap_or_default()
        ))),
    }
}
