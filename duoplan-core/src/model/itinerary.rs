use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::weekday_name;
use crate::model::{Event, WeatherSample};

/// The single shared document of a couple space. Always read and written
/// whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDocument {
    #[serde(default)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub default_weather_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub weather_locations: Vec<WeatherSample>,
}

impl Day {
    /// An empty day named after its weekday.
    pub fn new(id: String, date: NaiveDate) -> Self {
        Day {
            id,
            name: weekday_name(date),
            date,
            events: Vec::new(),
            weather_locations: Vec::new(),
        }
    }

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn has_weather_for(&self, location: &str) -> bool {
        self.weather_locations.iter().any(|w| w.location == location)
    }

    /// The sample to headline: the primary one, else the first.
    pub fn primary_weather(&self) -> Option<&WeatherSample> {
        self.weather_locations
            .iter()
            .find(|w| w.is_primary)
            .or_else(|| self.weather_locations.first())
    }
}

impl ItineraryDocument {
    pub fn day(&self, day_id: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.id == day_id)
    }

    /// Resolve a user-supplied day reference: an exact id first, then a
    /// weekday name (case-insensitive, first match wins).
    pub fn find_day(&self, reference: &str) -> Option<&Day> {
        self.day(reference).or_else(|| {
            self.days
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(reference))
        })
    }

    pub fn is_default_location(&self, location: &str) -> bool {
        self.default_weather_locations.iter().any(|l| l == location)
    }
}
