use std::sync::Arc;

use anyhow::Result;
use duoplan_core::geocode::{Geocoder, GoogleGeocoder};
use duoplan_core::model::CoupleSpace;
use duoplan_core::space;
use duoplan_core::store::FileStore;
use duoplan_core::weather::{ForecastProvider, NoForecasts, OpenWeatherMap, WeatherService};
use duoplan_core::{DuoplanConfig, DuoplanError, Planner, PlannerSession};
use uuid::Uuid;

use crate::utils::tui::create_spinner;

const NO_SPACE_HINT: &str = "You are not in a couple space yet.\n\n\
    Create one with:\n  \
    duoplan space create\n\n\
    Or join your partner's with:\n  \
    duoplan space join <code>";

/// Everything a command needs, loaded once per invocation.
pub struct AppContext {
    pub config: DuoplanConfig,
    pub user_id: String,
    pub store: FileStore,
    planner: Planner,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let mut config = DuoplanConfig::load()?;

        let user_id = match &config.user_id {
            Some(id) => id.clone(),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                config.user_id = Some(id.clone());
                config.save()?;
                id
            }
        };

        let timeout = config.request_timeout()?;
        let timezone = config.timezone()?;
        let store = FileStore::new(config.store_path()).with_poll_interval(config.poll_interval()?);

        let forecasts: Arc<dyn ForecastProvider> = match &config.openweather_api_key {
            Some(key) => Arc::new(OpenWeatherMap::new(key, timeout)?),
            None => Arc::new(NoForecasts),
        };
        let geocoder = match &config.google_maps_api_key {
            Some(key) => Geocoder::new(Arc::new(GoogleGeocoder::new(key, timeout)?)),
            None => Geocoder::disabled(),
        };

        let planner = Planner::new(
            Arc::new(store.clone()),
            WeatherService::new(forecasts, timezone),
            geocoder,
            timezone,
            config.default_weather_locations.clone(),
        );

        Ok(AppContext {
            config,
            user_id,
            store,
            planner,
        })
    }

    pub async fn current_space(&self) -> Result<Option<CoupleSpace>> {
        Ok(space::current_space(&self.store, &self.user_id).await?)
    }

    /// The user's space, or a hint on how to get one.
    pub async fn require_space(&self) -> Result<CoupleSpace> {
        match self.current_space().await? {
            Some(space) => Ok(space),
            None => anyhow::bail!(NO_SPACE_HINT),
        }
    }

    /// Open the shared itinerary. A first open seeds the upcoming weekend,
    /// which fetches weather, so a spinner runs meanwhile.
    pub async fn open_session(&self) -> Result<PlannerSession> {
        let space = match space::active_space(&self.store, &self.user_id).await {
            Ok(space) => space,
            Err(DuoplanError::NotInSpace(_)) => anyhow::bail!(NO_SPACE_HINT),
            Err(DuoplanError::WaitingForPartner(code)) => anyhow::bail!(
                "Your partner has not joined yet.\n\n\
                Share this code with them:\n  \
                {code}"
            ),
            Err(e) => return Err(e.into()),
        };

        let spinner = create_spinner("Loading itinerary".to_string());
        let session = self.planner.open(&space.id).await;
        spinner.finish_and_clear();

        Ok(session?)
    }
}
