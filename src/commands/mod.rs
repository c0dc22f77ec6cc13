pub mod config;
pub mod day;
pub mod event;
pub mod map;
pub mod show;
pub mod space;
pub mod watch;
pub mod weather;

use anyhow::Result;
use duoplan_core::model::{Day, Event, ItineraryDocument};
use duoplan_core::{DuoplanError, DuoplanResult};

/// Look up a day by id or weekday name.
pub fn resolve_day(doc: &ItineraryDocument, reference: &str) -> Result<Day> {
    match doc.find_day(reference) {
        Some(day) => Ok(day.clone()),
        None => {
            let available: Vec<_> = doc.days.iter().map(|d| d.name.to_lowercase()).collect();
            anyhow::bail!(
                "Day '{}' not found. Available: {}",
                reference,
                available.join(", ")
            );
        }
    }
}

/// Look up an event by id or by its 1-based number within the day.
pub fn resolve_event(day: &Day, reference: &str) -> Result<Event> {
    if let Some(event) = day.event(reference) {
        return Ok(event.clone());
    }

    let by_number = reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| day.events.get(i));

    match by_number {
        Some(event) => Ok(event.clone()),
        None => anyhow::bail!("No event '{}' on {}", reference, day.name),
    }
}

/// Turn a failed write into the retry prompt users see.
pub fn saved<T>(result: DuoplanResult<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(DuoplanError::Store(e)) => anyhow::bail!("Failed to save, please try again ({})", e),
        Err(e) => Err(e.into()),
    }
}
