//! Document store boundary.
//!
//! The store holds whole documents: a write atomically replaces the stored
//! itinerary, and every subscriber (the writer included) is handed the new
//! value. There is no version field; the last write to land wins.

mod file;
mod memory;
mod subscription;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use subscription::StoreSubscription;

use async_trait::async_trait;

use crate::error::DuoplanResult;
use crate::model::{CoupleSpace, ItineraryDocument};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point-in-time fetch.
    async fn read(&self, key: &str) -> DuoplanResult<Option<ItineraryDocument>>;

    /// Atomically replace the document stored under `key`.
    async fn write(&self, key: &str, document: &ItineraryDocument) -> DuoplanResult<()>;

    /// Live view of `key`. The handle starts at the current value and sees
    /// every later write until it is dropped.
    async fn subscribe(&self, key: &str) -> DuoplanResult<StoreSubscription>;
}

/// Couple-space records and user memberships.
#[async_trait]
pub trait SpaceStore: Send + Sync {
    async fn read_space(&self, space_id: &str) -> DuoplanResult<Option<CoupleSpace>>;

    async fn write_space(&self, space: &CoupleSpace) -> DuoplanResult<()>;

    /// Remove the space and its itinerary.
    async fn delete_space(&self, space_id: &str) -> DuoplanResult<()>;

    /// The space `user_id` currently belongs to.
    async fn read_membership(&self, user_id: &str) -> DuoplanResult<Option<String>>;

    async fn write_membership(&self, user_id: &str, space_id: Option<&str>) -> DuoplanResult<()>;
}
