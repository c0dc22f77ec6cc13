//! Shared itinerary data model.
//!
//! Everything here serializes to the JSON shape both collaborators read and
//! write: camelCase keys, `YYYY-MM-DD` dates, RFC 3339 instants.

mod couple_space;
mod event;
mod itinerary;
mod location;
mod weather;

pub use couple_space::CoupleSpace;
pub use event::{Event, EventKind, NewEvent};
pub use itinerary::{Day, ItineraryDocument};
pub use location::{Coordinates, PlacedLocation};
pub use weather::WeatherSample;
