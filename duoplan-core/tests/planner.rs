use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use chrono_tz::Tz;

use duoplan_core::error::{DuoplanError, DuoplanResult};
use duoplan_core::geocode::{GeocodeProvider, Geocoder};
use duoplan_core::model::{Coordinates, EventKind, NewEvent, PlacedLocation};
use duoplan_core::mutation::DayPosition;
use duoplan_core::store::MemoryStore;
use duoplan_core::weather::{ForecastPoint, ForecastProvider, WeatherService};
use duoplan_core::{Planner, PlannerSession};

/// Knows the temperature in a handful of places; fails for anywhere else.
struct KnownPlaces(HashMap<String, f64>);

#[async_trait]
impl ForecastProvider for KnownPlaces {
    async fn forecast_series(&self, location: &str) -> DuoplanResult<Vec<ForecastPoint>> {
        let temperature = self
            .0
            .get(location)
            .copied()
            .ok_or_else(|| DuoplanError::Provider(format!("city not found: {location}")))?;

        Ok(vec![ForecastPoint {
            time: Utc::now(),
            temperature,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }])
    }
}

/// Resolves one street and one map point.
struct OneStreet;

#[async_trait]
impl GeocodeProvider for OneStreet {
    async fn lookup_address(&self, address: &str) -> DuoplanResult<Option<PlacedLocation>> {
        Ok((address == "1 Main St").then(|| PlacedLocation {
            address: "1 Main St, Bowie, MD".to_string(),
            coordinates: Coordinates { lat: 39.0, lng: -76.7 },
            place_id: None,
        }))
    }

    async fn lookup_coordinates(&self, at: Coordinates) -> DuoplanResult<Option<PlacedLocation>> {
        Ok((at.lat > 0.0).then(|| PlacedLocation {
            address: "Harbor Point, Baltimore, MD".to_string(),
            coordinates: at,
            place_id: None,
        }))
    }
}

fn weather() -> WeatherService {
    let places = [("Bowie,MD,US", 71.6), ("Owings,MD,US", 68.2), ("Paris,FR", 55.0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    WeatherService::new(Arc::new(KnownPlaces(places)), Tz::UTC)
}

fn planner(geocoder: Geocoder) -> Planner {
    let defaults = vec![
        "Washington,DC,US".to_string(),
        "Bowie,MD,US".to_string(),
        "Owings,MD,US".to_string(),
    ];
    Planner::new(
        Arc::new(MemoryStore::new()),
        weather(),
        geocoder,
        Tz::UTC,
        defaults,
    )
}

async fn session() -> PlannerSession {
    planner(Geocoder::new(Arc::new(OneStreet)))
        .open("space")
        .await
        .unwrap()
}

fn new_event(time: &str, location: &str) -> NewEvent {
    NewEvent {
        time: time.to_string(),
        location: location.to_string(),
        kind: EventKind::Food,
        notes: None,
    }
}

#[tokio::test]
async fn opening_an_empty_space_seeds_the_weekend_with_weather() {
    let session = session().await;
    let doc = session.itinerary();

    let names: Vec<_> = doc.days.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Saturday", "Sunday"]);
    assert_eq!(doc.days[1].date - doc.days[0].date, Duration::days(1));
    assert_eq!(doc.default_weather_locations.len(), 3);

    // Washington has no forecast, so Bowie is the first available sample
    let saturday = &doc.days[0];
    let locations: Vec<_> = saturday
        .weather_locations
        .iter()
        .map(|w| (w.location.as_str(), w.temperature, w.is_primary))
        .collect();
    assert_eq!(
        locations,
        vec![("Bowie,MD,US", 72, true), ("Owings,MD,US", 68, false)]
    );
}

#[tokio::test]
async fn add_day_extends_either_end_with_default_weather() {
    let session = session().await;
    let saturday = session.itinerary().days[0].clone();

    let friday_id = session.add_day(DayPosition::Before).await.unwrap();
    let monday_id = session.add_day(DayPosition::After).await.unwrap();

    let doc = session.itinerary();
    assert_eq!(doc.days.len(), 4);
    assert_eq!(doc.days[0].id, friday_id);
    assert_eq!(doc.days[0].name, "Friday");
    assert_eq!(doc.days[0].date, saturday.date - Duration::days(1));
    assert_eq!(doc.days[3].id, monday_id);
    assert_eq!(doc.days[3].name, "Monday");
    assert_eq!(doc.days[3].weather_locations.len(), 2);
    assert!(doc.days[3].weather_locations[0].is_primary);
}

#[tokio::test]
async fn events_are_added_edited_moved_and_removed() {
    let session = session().await;
    let day_id = session.itinerary().days[0].id.clone();

    let brunch = session
        .add_event(&day_id, new_event("10:00", "Cafe"))
        .await
        .unwrap();
    let hike = session
        .add_event(&day_id, new_event("13:00", "Trail"))
        .await
        .unwrap();

    let order = |s: &PlannerSession| -> Vec<String> {
        s.itinerary().days[0].events.iter().map(|e| e.id.clone()).collect()
    };
    assert_eq!(order(&session), vec![brunch.clone(), hike.clone()]);

    session.move_event_down(&day_id, 0).await.unwrap();
    assert_eq!(order(&session), vec![hike.clone(), brunch.clone()]);
    session.move_event_up(&day_id, 1).await.unwrap();
    assert_eq!(order(&session), vec![brunch.clone(), hike.clone()]);

    let mut edited = session.itinerary().days[0].event(&hike).unwrap().clone();
    edited.notes = Some("bring water".to_string());
    session.update_event(&day_id, edited.clone()).await.unwrap();
    assert_eq!(session.itinerary().days[0].event(&hike), Some(&edited));

    session.delete_event(&day_id, &brunch).await.unwrap();
    assert_eq!(order(&session), vec![hike]);
}

#[tokio::test]
async fn weather_locations_per_day() {
    let session = session().await;
    let day_id = session.itinerary().days[0].id.clone();

    assert!(session.add_weather_location(&day_id, "Paris,FR").await.unwrap());
    assert!(!session.add_weather_location(&day_id, "Paris,FR").await.unwrap());
    assert!(!session.add_weather_location(&day_id, "Atlantis").await.unwrap());
    assert!(matches!(
        session.add_weather_location("no-such-day", "Paris,FR").await,
        Err(DuoplanError::DayNotFound(_))
    ));

    session.set_primary_weather(&day_id, "Paris,FR").await.unwrap();
    session.remove_weather_location(&day_id, "Paris,FR").await.unwrap();

    let day = session.itinerary().days[0].clone();
    let primaries = day.weather_locations.iter().filter(|w| w.is_primary).count();
    assert_eq!(primaries, 1);
    assert_eq!(day.weather_locations[0].location, "Bowie,MD,US");
    assert!(day.weather_locations[0].is_primary);
}

#[tokio::test]
async fn toggling_a_default_backfills_every_day() {
    let session = session().await;

    assert!(session.toggle_default_location("Paris,FR").await.unwrap());
    let doc = session.itinerary();
    assert!(doc.is_default_location("Paris,FR"));
    assert!(doc.days.iter().all(|d| d.has_weather_for("Paris,FR")));

    assert!(!session.toggle_default_location("Paris,FR").await.unwrap());
    let doc = session.itinerary();
    assert!(!doc.is_default_location("Paris,FR"));
    // Removing a default leaves existing samples alone
    assert!(doc.days.iter().all(|d| d.has_weather_for("Paris,FR")));
}

#[tokio::test]
async fn map_point_becomes_an_activity() {
    let session = session().await;
    let day_id = session.itinerary().days[1].id.clone();

    let added = session
        .add_event_at(&day_id, Coordinates { lat: 39.28, lng: -76.6 })
        .await
        .unwrap();
    let event_id = added.expect("point should resolve");

    let day = session.itinerary().days[1].clone();
    let event = day.event(&event_id).unwrap();
    assert_eq!(event.location, "Harbor Point, Baltimore, MD");
    assert_eq!(event.kind, EventKind::Activity);

    let nowhere = session
        .add_event_at(&day_id, Coordinates { lat: -10.0, lng: 0.0 })
        .await
        .unwrap();
    assert!(nowhere.is_none());
    assert_eq!(session.itinerary().days[1].events.len(), 1);
}

#[tokio::test]
async fn map_point_is_skipped_without_a_geocoder() {
    let session = planner(Geocoder::disabled()).open("space").await.unwrap();
    let day_id = session.itinerary().days[0].id.clone();

    let added = session
        .add_event_at(&day_id, Coordinates { lat: 39.28, lng: -76.6 })
        .await
        .unwrap();
    assert!(added.is_none());
    assert!(session.itinerary().days[0].events.is_empty());
}

#[tokio::test]
async fn located_events_are_numbered_per_day() {
    let session = session().await;
    let doc = session.itinerary();
    let (sat, sun) = (doc.days[0].id.clone(), doc.days[1].id.clone());

    session.add_event(&sat, new_event("09:00", "1 Main St")).await.unwrap();
    session.add_event(&sat, new_event("12:00", "")).await.unwrap();
    session.add_event(&sat, new_event("15:00", "Somewhere")).await.unwrap();
    session.add_event(&sun, new_event("11:00", "1 Main St")).await.unwrap();

    let pins = session.locate_events().await;
    let summary: Vec<_> = pins
        .iter()
        .map(|p| (p.day_name.as_str(), p.number, p.color, p.coordinates.is_some()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Saturday", 1, 0, true),
            ("Saturday", 2, 0, false),
            ("Sunday", 1, 1, true),
        ]
    );
    assert_eq!(pins[0].title, "09:00 - 1 Main St");
}
