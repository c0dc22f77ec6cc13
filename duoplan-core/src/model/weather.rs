use serde::{Deserialize, Serialize};

/// One location's forecast for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    /// Provider query string (e.g. `Bowie,MD,US`); unique within a day.
    pub location: String,
    /// Degrees Fahrenheit.
    pub temperature: i32,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl WeatherSample {
    /// The location without region/country suffix, for display.
    pub fn short_name(&self) -> &str {
        self.location.split(',').next().unwrap_or(&self.location)
    }
}
