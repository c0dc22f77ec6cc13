//! Core of duoplan, a shared weekend itinerary for two.
//!
//! - `model` for the shared document and its JSON shape
//! - `mutation` for pure edits to that document
//! - `store` for where documents live and how changes are pushed
//! - `sync` for the optimistic, last-write-wins client mirror
//! - `weather` and `geocode` for best-effort enrichment
//! - `planner` and `space` for user-level operations built on the above

pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod geocode;
pub mod id;
pub mod model;
pub mod mutation;
pub mod planner;
pub mod seed;
pub mod space;
pub mod store;
pub mod sync;
pub mod weather;

pub use config::DuoplanConfig;
pub use error::{DuoplanError, DuoplanResult};
pub use planner::{MapPin, Planner, PlannerSession};
pub use sync::{LiveItinerary, Seeder, SyncEngine};
