//! User-intent layer over a live itinerary.
//!
//! A [`PlannerSession`] turns "add a weather location to Saturday" into
//! enrichment lookups plus one pure mutation pushed through the sync engine.
//! Network work happens before the mutation is built, so a slow provider
//! never holds the mirror.

use std::sync::Arc;

use chrono_tz::Tz;
use futures::future::join_all;
use tracing::debug;

use crate::dates::{time_label_in, today_in};
use crate::error::{DuoplanError, DuoplanResult};
use crate::geocode::Geocoder;
use crate::id::new_event_id;
use crate::model::{Coordinates, Day, Event, EventKind, ItineraryDocument, NewEvent, WeatherSample};
use crate::mutation::{self, DayPosition};
use crate::seed::WeekendSeeder;
use crate::store::DocumentStore;
use crate::sync::{LiveItinerary, SyncEngine};
use crate::weather::WeatherService;

/// Number of distinct day colours used for map pins.
pub const DAY_COLOR_COUNT: usize = 7;

#[derive(Clone)]
pub struct Planner {
    engine: SyncEngine,
    weather: WeatherService,
    geocoder: Geocoder,
    timezone: Tz,
}

impl Planner {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        weather: WeatherService,
        geocoder: Geocoder,
        timezone: Tz,
        default_locations: Vec<String>,
    ) -> Self {
        let seeder = WeekendSeeder::new(weather.clone(), default_locations, timezone);
        Planner {
            engine: SyncEngine::new(store, Arc::new(seeder)),
            weather,
            geocoder,
            timezone,
        }
    }

    pub async fn open(&self, space_id: &str) -> DuoplanResult<PlannerSession> {
        let live = self.engine.subscribe(space_id).await?;
        Ok(PlannerSession {
            live,
            weather: self.weather.clone(),
            geocoder: self.geocoder.clone(),
            timezone: self.timezone,
        })
    }
}

/// An event with a location, ready to drop on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub event_id: String,
    pub day_id: String,
    pub day_name: String,
    /// 1-based position among the day's located events.
    pub number: usize,
    /// Index into a palette of [`DAY_COLOR_COUNT`] colours.
    pub color: usize,
    pub title: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

pub struct PlannerSession {
    live: LiveItinerary,
    weather: WeatherService,
    geocoder: Geocoder,
    timezone: Tz,
}

impl PlannerSession {
    pub fn itinerary(&self) -> ItineraryDocument {
        self.live.current()
    }

    pub fn live(&self) -> &LiveItinerary {
        &self.live
    }

    pub async fn changed(&mut self) -> Option<ItineraryDocument> {
        self.live.changed().await
    }

    pub fn close(self) {
        self.live.unsubscribe();
    }

    async fn edit_day<F>(&self, day_id: &str, edit: F) -> DuoplanResult<()>
    where
        F: FnOnce(&Day) -> Day,
    {
        self.live
            .mutate(|doc| mutation::update_day(doc, day_id, edit))
            .await
    }

    fn require_day(&self, day_id: &str) -> DuoplanResult<Day> {
        self.live
            .current()
            .day(day_id)
            .cloned()
            .ok_or_else(|| DuoplanError::DayNotFound(day_id.to_string()))
    }

    // EVENTS:

    /// Add an event and return its generated id.
    pub async fn add_event(&self, day_id: &str, event: NewEvent) -> DuoplanResult<String> {
        let id = new_event_id();
        let event = event.with_id(id.clone());
        self.edit_day(day_id, |day| mutation::add_event(day, event))
            .await?;
        Ok(id)
    }

    pub async fn update_event(&self, day_id: &str, event: Event) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| mutation::update_event(day, event))
            .await
    }

    pub async fn delete_event(&self, day_id: &str, event_id: &str) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| mutation::delete_event(day, event_id))
            .await
    }

    pub async fn reorder_events(&self, day_id: &str, new_order: Vec<Event>) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| mutation::reorder_events(day, new_order))
            .await
    }

    pub async fn move_event_up(&self, day_id: &str, index: usize) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| {
            mutation::reorder_events(day, mutation::move_event_up(&day.events, index))
        })
        .await
    }

    pub async fn move_event_down(&self, day_id: &str, index: usize) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| {
            mutation::reorder_events(day, mutation::move_event_down(&day.events, index))
        })
        .await
    }

    /// Add an activity at a map point, named by its resolved address and
    /// timed at the current local time. Returns `None` without editing
    /// anything when the point cannot be resolved.
    pub async fn add_event_at(
        &self,
        day_id: &str,
        at: Coordinates,
    ) -> DuoplanResult<Option<String>> {
        let Some(place) = self.geocoder.reverse_geocode(at).await else {
            debug!(%at, "no address for map point, skipping");
            return Ok(None);
        };

        let event = NewEvent {
            time: time_label_in(self.timezone),
            location: place.address,
            kind: EventKind::Activity,
            notes: None,
        };
        self.add_event(day_id, event).await.map(Some)
    }

    // DAYS:

    /// Add a day before the first or after the last, with weather for every
    /// default location. Returns the new day's id.
    pub async fn add_day(&self, position: DayPosition) -> DuoplanResult<String> {
        let snapshot = self.live.current();
        let day = mutation::plan_day(&snapshot, position, today_in(self.timezone));

        let samples = self
            .weather
            .forecast_many(&snapshot.default_weather_locations, day.date)
            .await;
        let day = mutation::seed_weather(&day, samples);
        let id = day.id.clone();

        self.live
            .mutate(|doc| mutation::insert_day(doc, position, day))
            .await?;
        Ok(id)
    }

    pub async fn delete_day(&self, day_id: &str) -> DuoplanResult<()> {
        self.live
            .mutate(|doc| mutation::delete_day(doc, day_id))
            .await
    }

    // WEATHER:

    /// Fetch weather for `location` on the day and append it. Returns
    /// whether a sample was added.
    pub async fn add_weather_location(&self, day_id: &str, location: &str) -> DuoplanResult<bool> {
        let day = self.require_day(day_id)?;
        if day.has_weather_for(location) {
            return Ok(false);
        }

        let Some(sample) = self.weather.forecast_for(location, day.date).await else {
            return Ok(false);
        };

        self.edit_day(day_id, |day| mutation::add_weather_location(day, sample))
            .await?;
        Ok(true)
    }

    pub async fn remove_weather_location(&self, day_id: &str, location: &str) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| mutation::remove_weather_location(day, location))
            .await
    }

    pub async fn set_primary_weather(&self, day_id: &str, location: &str) -> DuoplanResult<()> {
        self.edit_day(day_id, |day| mutation::set_primary_weather(day, location))
            .await
    }

    /// Toggle `location` in the default list. When it is being added, every
    /// day that lacks it gets a sample in the same edit. Returns whether the
    /// location is now a default.
    pub async fn toggle_default_location(&self, location: &str) -> DuoplanResult<bool> {
        let snapshot = self.live.current();
        let adding = !snapshot.is_default_location(location);

        let mut fetched: Vec<(String, WeatherSample)> = Vec::new();
        if adding {
            let missing: Vec<_> = snapshot
                .days
                .iter()
                .filter(|day| !day.has_weather_for(location))
                .collect();
            let samples = join_all(
                missing
                    .iter()
                    .map(|day| self.weather.forecast_for(location, day.date)),
            )
            .await;

            fetched = missing
                .iter()
                .zip(samples)
                .filter_map(|(day, sample)| Some((day.id.clone(), sample?)))
                .collect();
        }

        self.live
            .mutate(|doc| {
                fetched.into_iter().fold(
                    mutation::toggle_default_location(doc, location),
                    |doc, (day_id, sample)| {
                        mutation::update_day(&doc, &day_id, |day| {
                            mutation::add_weather_location(day, sample)
                        })
                    },
                )
            })
            .await?;
        Ok(adding)
    }

    // MAP:

    /// Pins for every event with a location, geocoded concurrently. Pins the
    /// geocoder cannot place keep `coordinates: None`.
    pub async fn locate_events(&self) -> Vec<MapPin> {
        let snapshot = self.live.current();

        let pins: Vec<MapPin> = snapshot
            .days
            .iter()
            .enumerate()
            .flat_map(|(day_index, day)| {
                day.events
                    .iter()
                    .filter(|event| !event.location.trim().is_empty())
                    .enumerate()
                    .map(move |(event_index, event)| MapPin {
                        event_id: event.id.clone(),
                        day_id: day.id.clone(),
                        day_name: day.name.clone(),
                        number: event_index + 1,
                        color: day_index % DAY_COLOR_COUNT,
                        title: format!("{} - {}", event.time, event.location),
                        address: event.location.clone(),
                        coordinates: None,
                    })
            })
            .collect();

        let coordinates = join_all(pins.iter().map(|pin| self.geocoder.geocode(&pin.address))).await;

        pins.into_iter()
            .zip(coordinates)
            .map(|(pin, coordinates)| MapPin { coordinates, ..pin })
            .collect()
    }
}
