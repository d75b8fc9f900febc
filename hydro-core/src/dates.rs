//! Date handling at the API boundary.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Format used for every date sent to the backend.
pub const BACKEND_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format the series endpoint reports its data bounds in.
pub const BOUND_DATE_FORMAT: &str = "%d-%m-%Y";

/// Format a query date for the backend as zero-padded `YYYY-MM-DD`.
///
/// An absent endpoint becomes the empty string, which the backend reads as
/// unbounded on that side.
pub fn format_date_for_backend(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(BACKEND_DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), BACKEND_DATE_FORMAT).ok()
}

/// Parse a series bound, accepting `DD-MM-YYYY` and `YYYY-MM-DD`.
pub fn parse_bound_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, BOUND_DATE_FORMAT)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, BACKEND_DATE_FORMAT).ok())
}

/// Calendar year of a measurement timestamp as written, without converting
/// between time zones.
///
/// Accepts RFC 3339 (`2021-01-01T00:00:00+01:00`), naive ISO datetimes with
/// or without fractional seconds, and bare dates.
pub fn timestamp_year(timestamp: &str) -> Option<i32> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.year());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Some(dt.year());
        }
    }
    parse_date(timestamp).map(|d| d.year())
}

/// Attach a year to a percentile row's month-day key (`MM-DD...`).
pub fn anchor_month_day(year: i32, month_day: &str) -> String {
    format!("{year:04}-{month_day}")
}

/// First and last day of a calendar year as `YYYY-MM-DD`.
pub fn year_bounds(year: i32) -> (String, String) {
    (format!("{year:04}-01-01"), format!("{year:04}-12-31"))
}

/// Serde helper for nullable series bounds.
pub fn deserialize_bound<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_bound_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid bound date: {s}"))),
    }
}
