//! Geocoding: addresses to coordinates and map points back to addresses.
//!
//! Best effort like weather: a missing key, a failed request or no match
//! all come back as `None`, and the event keeps whatever free text it had.

mod google;

pub use google::GoogleGeocoder;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::DuoplanResult;
use crate::model::{Coordinates, PlacedLocation};

/// A geocoding backend. Returns at most one best match per call.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn lookup_address(&self, address: &str) -> DuoplanResult<Option<PlacedLocation>>;
    async fn lookup_coordinates(&self, at: Coordinates) -> DuoplanResult<Option<PlacedLocation>>;
}

#[derive(Clone, Default)]
pub struct Geocoder {
    provider: Option<Arc<dyn GeocodeProvider>>,
}

impl Geocoder {
    pub fn new(provider: Arc<dyn GeocodeProvider>) -> Self {
        Geocoder {
            provider: Some(provider),
        }
    }

    /// A geocoder that never resolves anything.
    pub fn disabled() -> Self {
        Geocoder::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn locate(&self, address: &str) -> Option<PlacedLocation> {
        let provider = self.provider.as_ref()?;
        if address.trim().is_empty() {
            return None;
        }

        match provider.lookup_address(address).await {
            Ok(found) => found,
            Err(e) => {
                warn!(address, error = %e, "geocoding failed");
                None
            }
        }
    }

    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        self.locate(address).await.map(|place| place.coordinates)
    }

    pub async fn reverse_geocode(&self, at: Coordinates) -> Option<PlacedLocation> {
        let provider = self.provider.as_ref()?;

        match provider.lookup_coordinates(at).await {
            Ok(found) => found,
            Err(e) => {
                warn!(%at, error = %e, "reverse geocoding failed");
                None
            }
        }
    }
}
