//! Global duoplan configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_WEATHER_LOCATIONS};
use crate::dates::resolve_timezone;
use crate::error::{DuoplanError, DuoplanResult};

static DEFAULT_STORE_DIR: &str = "~/duoplan";

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

fn is_default_store_dir(p: &PathBuf) -> bool {
    *p == default_store_dir()
}

fn default_weather_locations() -> Vec<String> {
    DEFAULT_WEATHER_LOCATIONS.iter().map(|l| l.to_string()).collect()
}

fn is_default_weather_locations(locations: &Vec<String>) -> bool {
    *locations == default_weather_locations()
}

fn default_request_timeout() -> String {
    humantime::format_duration(DEFAULT_REQUEST_TIMEOUT).to_string()
}

fn default_poll_interval() -> String {
    humantime::format_duration(DEFAULT_POLL_INTERVAL).to_string()
}

/// Global configuration at ~/.config/duoplan/config.toml
///
/// Every key can be overridden from the environment with a `DUOPLAN_`
/// prefix, e.g. `DUOPLAN_OPENWEATHER_API_KEY`. List values taken from the
/// environment are separated with `;`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DuoplanConfig {
    #[serde(default = "default_store_dir", skip_serializing_if = "is_default_store_dir")]
    pub store_dir: PathBuf,

    /// This client's user id, generated on first use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openweather_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_api_key: Option<String>,

    #[serde(
        default = "default_weather_locations",
        skip_serializing_if = "is_default_weather_locations"
    )]
    pub default_weather_locations: Vec<String>,

    /// IANA zone name. Unset means the system zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl Default for DuoplanConfig {
    fn default() -> Self {
        DuoplanConfig {
            store_dir: default_store_dir(),
            user_id: None,
            openweather_api_key: None,
            google_maps_api_key: None,
            default_weather_locations: default_weather_locations(),
            timezone: None,
            request_timeout: default_request_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl DuoplanConfig {
    pub fn config_path() -> DuoplanResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DuoplanError::Config("Could not determine config directory".into()))?
            .join("duoplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file
    /// first if there is none.
    pub fn load() -> DuoplanResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DuoplanResult<Self> {
        let config: DuoplanConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("DUOPLAN")
                    .list_separator(";")
                    .with_list_parse_key("default_weather_locations")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| DuoplanError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DuoplanError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Save the current config to ~/.config/duoplan/config.toml
    pub fn save(&self) -> DuoplanResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> DuoplanResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DuoplanError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DuoplanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| DuoplanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DuoplanResult<()> {
        let contents = format!(
            "\
# duoplan configuration

# Where shared itineraries and couple spaces are stored:
# store_dir = \"{}\"

# Weather forecasts (https://openweathermap.org/api):
# openweather_api_key = \"...\"

# Geocoding for map pins and adding events from a map point:
# google_maps_api_key = \"...\"

# Locations every new day gets weather for:
# default_weather_locations = [{}]

# Timezone used for \"today\" and local noon (defaults to the system zone):
# timezone = \"America/New_York\"

# request_timeout = \"{}\"
# poll_interval = \"{}\"
",
            DEFAULT_STORE_DIR,
            DEFAULT_WEATHER_LOCATIONS
                .iter()
                .map(|l| format!("\"{l}\""))
                .collect::<Vec<_>>()
                .join(", "),
            default_request_timeout(),
            default_poll_interval(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DuoplanError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DuoplanError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.store_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn request_timeout(&self) -> DuoplanResult<Duration> {
        parse_duration("request_timeout", &self.request_timeout)
    }

    pub fn poll_interval(&self) -> DuoplanResult<Duration> {
        parse_duration("poll_interval", &self.poll_interval)
    }

    pub fn timezone(&self) -> DuoplanResult<Tz> {
        resolve_timezone(self.timezone.as_deref())
    }
}

fn parse_duration(key: &str, value: &str) -> DuoplanResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| DuoplanError::Config(format!("Invalid {key} '{value}': {e}")))
}
