use std::time::Duration;

/// Weather locations seeded into a new itinerary when none are configured.
pub const DEFAULT_WEATHER_LOCATIONS: [&str; 3] = ["Washington,DC,US", "Bowie,MD,US", "Owings,MD,US"];

/// Timeout applied to every weather and geocoding request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the file store checks for writes made by other processes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
