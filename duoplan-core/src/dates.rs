//! Calendar helpers: the upcoming weekend, weekday labels, local noon.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{DuoplanError, DuoplanResult};

/// The next Saturday on or after `today`.
pub fn upcoming_saturday(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().num_days_from_sunday();
    let days_ahead = (6 - weekday + 7) % 7;
    today + Duration::days(days_ahead as i64)
}

/// Saturday and Sunday of the upcoming weekend.
pub fn upcoming_weekend(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let saturday = upcoming_saturday(today);
    (saturday, saturday + Duration::days(1))
}

/// Full English weekday name, e.g. "Saturday".
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Current wall-clock time in `tz` as `HH:MM`.
pub fn time_label_in(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%H:%M").to_string()
}

/// Noon on `date` in `tz`, as an instant. Falls back to noon UTC if the
/// local time does not exist.
pub fn local_noon(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let noon = date.and_time(NaiveTime::MIN) + Duration::hours(12);

    tz.from_local_datetime(&noon)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| noon.and_utc())
}

/// Resolve an IANA zone name, falling back to the system zone, then UTC.
pub fn resolve_timezone(name: Option<&str>) -> DuoplanResult<Tz> {
    if let Some(name) = name {
        return name
            .parse::<Tz>()
            .map_err(|_| DuoplanError::Config(format!("Unknown timezone '{}'", name)));
    }

    Ok(iana_time_zone::get_timezone()
        .ok()
        .and_then(|system| system.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC))
}
