//! First-run itinerary: the upcoming weekend with weather for each default
//! location.

use async_trait::async_trait;
use chrono_tz::Tz;
use futures::future::join_all;

use crate::dates::{today_in, upcoming_weekend};
use crate::id::new_day_id;
use crate::model::{Day, ItineraryDocument};
use crate::mutation::seed_weather;
use crate::sync::Seeder;
use crate::weather::WeatherService;

pub struct WeekendSeeder {
    weather: WeatherService,
    default_locations: Vec<String>,
    timezone: Tz,
}

impl WeekendSeeder {
    pub fn new(weather: WeatherService, default_locations: Vec<String>, timezone: Tz) -> Self {
        WeekendSeeder {
            weather,
            default_locations,
            timezone,
        }
    }

    pub async fn weekend_document(&self, today: chrono::NaiveDate) -> ItineraryDocument {
        let (saturday, sunday) = upcoming_weekend(today);

        let days = join_all([saturday, sunday].into_iter().map(|date| async move {
            let day = Day::new(new_day_id(), date);
            let samples = self.weather.forecast_many(&self.default_locations, date).await;
            seed_weather(&day, samples)
        }))
        .await;

        ItineraryDocument {
            days,
            default_weather_locations: self.default_locations.clone(),
        }
    }
}

#[async_trait]
impl Seeder for WeekendSeeder {
    async fn initial_document(&self, _space_id: &str) -> ItineraryDocument {
        self.weekend_document(today_in(self.timezone)).await
    }
}
