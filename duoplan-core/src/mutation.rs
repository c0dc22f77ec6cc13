//! Pure itinerary edits.
//!
//! Each function takes the current document (or day) and returns the next
//! one; nothing here touches the store or the network. Targets that do not
//! exist are silently ignored, so callers can apply an edit computed against
//! a slightly stale snapshot without special-casing.

use chrono::{Duration, NaiveDate};

use crate::dates::upcoming_saturday;
use crate::id::new_day_id;
use crate::model::{Day, Event, ItineraryDocument, WeatherSample};

/// Where a new day goes relative to the existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPosition {
    Before,
    After,
}

// EVENTS:

pub fn add_event(day: &Day, event: Event) -> Day {
    let mut next = day.clone();
    next.events.push(event);
    next
}

pub fn update_event(day: &Day, event: Event) -> Day {
    let mut next = day.clone();
    if let Some(slot) = next.events.iter_mut().find(|e| e.id == event.id) {
        *slot = event;
    }
    next
}

pub fn delete_event(day: &Day, event_id: &str) -> Day {
    let mut next = day.clone();
    next.events.retain(|e| e.id != event_id);
    next
}

/// Replace the event order verbatim. The caller guarantees `new_order` is a
/// permutation of the current events.
pub fn reorder_events(day: &Day, new_order: Vec<Event>) -> Day {
    let mut next = day.clone();
    next.events = new_order;
    next
}

/// Swap the event at `index` with the one above it. No-op for the first
/// event or an out-of-range index.
pub fn move_event_up(events: &[Event], index: usize) -> Vec<Event> {
    let mut reordered = events.to_vec();
    if index > 0 && index < reordered.len() {
        reordered.swap(index, index - 1);
    }
    reordered
}

/// Swap the event at `index` with the one below it. No-op for the last
/// event or an out-of-range index.
pub fn move_event_down(events: &[Event], index: usize) -> Vec<Event> {
    let mut reordered = events.to_vec();
    if index + 1 < reordered.len() {
        reordered.swap(index, index + 1);
    }
    reordered
}

// DAYS:

/// The day `add_day` would insert: one calendar day before the first day or
/// after the last, or the upcoming Saturday when there are no days.
pub fn plan_day(document: &ItineraryDocument, position: DayPosition, today: NaiveDate) -> Day {
    let anchor = match position {
        DayPosition::Before => document.days.first(),
        DayPosition::After => document.days.last(),
    };

    let date = match (anchor, position) {
        (None, _) => upcoming_saturday(today),
        (Some(day), DayPosition::Before) => day.date - Duration::days(1),
        (Some(day), DayPosition::After) => day.date + Duration::days(1),
    };

    Day::new(new_day_id(), date)
}

pub fn insert_day(document: &ItineraryDocument, position: DayPosition, day: Day) -> ItineraryDocument {
    let mut next = document.clone();
    match position {
        DayPosition::Before => next.days.insert(0, day),
        DayPosition::After => next.days.push(day),
    }
    next
}

pub fn add_day(
    document: &ItineraryDocument,
    position: DayPosition,
    today: NaiveDate,
) -> ItineraryDocument {
    let day = plan_day(document, position, today);
    insert_day(document, position, day)
}

pub fn delete_day(document: &ItineraryDocument, day_id: &str) -> ItineraryDocument {
    let mut next = document.clone();
    next.days.retain(|d| d.id != day_id);
    next
}

/// Apply a day-scoped edit to the day with `day_id`.
pub fn update_day(
    document: &ItineraryDocument,
    day_id: &str,
    edit: impl FnOnce(&Day) -> Day,
) -> ItineraryDocument {
    let mut next = document.clone();
    if let Some(slot) = next.days.iter_mut().find(|d| d.id == day_id) {
        *slot = edit(slot);
    }
    next
}

// WEATHER:

/// Append a sample. It becomes primary only if the day had none; a location
/// already on the day is not added twice.
pub fn add_weather_location(day: &Day, sample: WeatherSample) -> Day {
    let mut next = day.clone();
    if next.has_weather_for(&sample.location) {
        return next;
    }

    let is_primary = next.weather_locations.is_empty();
    next.weather_locations.push(WeatherSample { is_primary, ..sample });
    next
}

/// Remove a sample, promoting the first remaining one if the primary went.
pub fn remove_weather_location(day: &Day, location: &str) -> Day {
    let mut next = day.clone();
    next.weather_locations.retain(|w| w.location != location);

    if !next.weather_locations.iter().any(|w| w.is_primary) {
        if let Some(first) = next.weather_locations.first_mut() {
            first.is_primary = true;
        }
    }
    next
}

pub fn set_primary_weather(day: &Day, location: &str) -> Day {
    let mut next = day.clone();
    if !next.has_weather_for(location) {
        return next;
    }

    for sample in &mut next.weather_locations {
        sample.is_primary = sample.location == location;
    }
    next
}

/// Build a day's initial weather list from fetched samples, in order. The
/// first sample becomes primary.
pub fn seed_weather(day: &Day, samples: impl IntoIterator<Item = WeatherSample>) -> Day {
    samples
        .into_iter()
        .fold(day.clone(), |day, sample| add_weather_location(&day, sample))
}

pub fn toggle_default_location(document: &ItineraryDocument, location: &str) -> ItineraryDocument {
    let mut next = document.clone();
    if next.is_default_location(location) {
        next.default_weather_locations.retain(|l| l != location);
    } else {
        next.default_weather_locations.push(location.to_string());
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, time: &str) -> Event {
        Event {
            id: id.to_string(),
            time: time.to_string(),
            location: format!("{} place", id),
            kind: EventKind::Activity,
            notes: None,
        }
    }

    fn sample(location: &str, is_primary: bool) -> WeatherSample {
        WeatherSample {
            location: location.to_string(),
            temperature: 70,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            is_primary,
        }
    }

    fn weekend() -> ItineraryDocument {
        ItineraryDocument {
            days: vec![
                Day::new("sat".to_string(), date(2026, 10, 24)),
                Day::new("sun".to_string(), date(2026, 10, 25)),
            ],
            default_weather_locations: vec!["NYC".to_string()],
        }
    }

    fn primary_count(day: &Day) -> usize {
        day.weather_locations.iter().filter(|w| w.is_primary).count()
    }

    // --- events ---

    #[test]
    fn add_then_delete_restores_events() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.events = vec![event("a", "09:00"), event("b", "12:00")];

        let added = add_event(&day, event("fresh", "18:00"));
        assert_eq!(added.events.len(), 3);
        assert_eq!(added.events[2].id, "fresh");

        let restored = delete_event(&added, "fresh");
        assert_eq!(restored.events, day.events);
    }

    #[test]
    fn update_replaces_matching_event_in_place() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.events = vec![event("a", "09:00"), event("b", "12:00")];

        let mut edited = event("a", "10:30");
        edited.kind = EventKind::Food;
        let next = update_event(&day, edited.clone());

        assert_eq!(next.events[0], edited);
        assert_eq!(next.events[1], day.events[1]);
    }

    #[test]
    fn missing_targets_are_no_ops() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.events = vec![event("a", "09:00")];

        assert_eq!(update_event(&day, event("zzz", "10:00")), day);
        assert_eq!(delete_event(&day, "zzz"), day);

        let doc = weekend();
        assert_eq!(delete_day(&doc, "monday"), doc);
        assert_eq!(update_day(&doc, "monday", |d| add_event(d, event("x", "1"))), doc);
    }

    #[test]
    fn reorder_with_current_order_is_identity() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.events = vec![event("a", "09:00"), event("b", "12:00"), event("c", "15:00")];

        assert_eq!(reorder_events(&day, day.events.clone()), day);
    }

    #[test]
    fn move_down_then_back_up() {
        let events = vec![event("a", "09:00"), event("b", "12:00")];

        let down = move_event_down(&events, 0);
        assert_eq!(down[0].id, "b");
        assert_eq!(down[1].id, "a");

        let up = move_event_up(&down, 1);
        assert_eq!(up, events);
    }

    #[test]
    fn moves_at_boundaries_are_no_ops() {
        let events = vec![event("a", "09:00"), event("b", "12:00")];
        assert_eq!(move_event_up(&events, 0), events);
        assert_eq!(move_event_down(&events, 1), events);
        assert_eq!(move_event_down(&events, 7), events);
    }

    // --- days ---

    #[test]
    fn add_day_before_on_empty_document_from_wednesday() {
        let doc = ItineraryDocument::default();
        let next = add_day(&doc, DayPosition::Before, date(2026, 10, 21));

        assert_eq!(next.days.len(), 1);
        assert_eq!(next.days[0].name, "Saturday");
        assert_eq!(next.days[0].date, date(2026, 10, 24));
    }

    #[test]
    fn add_day_before_and_after_extend_the_range() {
        let doc = weekend();

        let before = add_day(&doc, DayPosition::Before, date(2026, 10, 21));
        assert_eq!(before.days[0].date, date(2026, 10, 23));
        assert_eq!(before.days[0].name, "Friday");
        assert_eq!(before.days.len(), 3);

        let after = add_day(&doc, DayPosition::After, date(2026, 10, 21));
        assert_eq!(after.days[2].date, date(2026, 10, 26));
        assert_eq!(after.days[2].name, "Monday");
    }

    #[test]
    fn planned_days_get_fresh_ids() {
        let doc = weekend();
        let a = plan_day(&doc, DayPosition::After, date(2026, 10, 21));
        let b = plan_day(&doc, DayPosition::After, date(2026, 10, 21));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn delete_day_removes_only_that_day() {
        let next = delete_day(&weekend(), "sat");
        assert_eq!(next.days.len(), 1);
        assert_eq!(next.days[0].id, "sun");
    }

    // --- weather ---

    #[test]
    fn first_weather_location_becomes_primary() {
        let day = Day::new("sat".to_string(), date(2026, 10, 24));

        let day = add_weather_location(&day, sample("NYC", false));
        let day = add_weather_location(&day, sample("LA", true));

        assert!(day.weather_locations[0].is_primary);
        assert!(!day.weather_locations[1].is_primary);
    }

    #[test]
    fn duplicate_weather_location_is_ignored() {
        let day = Day::new("sat".to_string(), date(2026, 10, 24));
        let day = add_weather_location(&day, sample("NYC", false));
        let again = add_weather_location(&day, sample("NYC", false));
        assert_eq!(again, day);
    }

    #[test]
    fn removing_primary_promotes_first_remaining() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.weather_locations = vec![sample("NYC", true), sample("LA", false)];

        let next = remove_weather_location(&day, "NYC");
        assert_eq!(next.weather_locations, vec![sample("LA", true)]);
    }

    #[test]
    fn set_primary_is_exclusive() {
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));
        day.weather_locations = vec![sample("NYC", true), sample("LA", false), sample("SF", false)];

        let next = set_primary_weather(&day, "SF");
        let primaries: Vec<_> = next
            .weather_locations
            .iter()
            .filter(|w| w.is_primary)
            .map(|w| w.location.as_str())
            .collect();
        assert_eq!(primaries, vec!["SF"]);

        // Unknown location keeps the current primary
        assert_eq!(set_primary_weather(&next, "Boston"), next);
    }

    #[test]
    fn primary_invariant_holds_across_edit_sequences() {
        let locations = ["NYC", "LA", "SF", "DC"];
        let mut day = Day::new("sat".to_string(), date(2026, 10, 24));

        for (step, location) in locations.iter().cycle().take(24).enumerate() {
            day = match step % 3 {
                0 => add_weather_location(&day, sample(location, false)),
                1 => set_primary_weather(&day, location),
                _ => remove_weather_location(&day, location),
            };

            let expected = if day.weather_locations.is_empty() { 0 } else { 1 };
            assert_eq!(primary_count(&day), expected, "after step {}", step);
        }
    }

    #[test]
    fn seed_weather_marks_first_available_primary() {
        let day = Day::new("sat".to_string(), date(2026, 10, 24));
        let seeded = seed_weather(&day, vec![sample("LA", false), sample("SF", false)]);

        assert_eq!(primary_count(&seeded), 1);
        assert!(seeded.weather_locations[0].is_primary);
    }

    #[test]
    fn toggle_default_location_is_its_own_inverse() {
        let doc = weekend();

        let added = toggle_default_location(&doc, "LA");
        assert_eq!(added.default_weather_locations, vec!["NYC", "LA"]);

        let back = toggle_default_location(&added, "LA");
        assert_eq!(back.default_weather_locations, doc.default_weather_locations);

        let removed = toggle_default_location(&doc, "NYC");
        assert!(removed.default_weather_locations.is_empty());
    }
}
