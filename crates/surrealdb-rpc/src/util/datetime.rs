//! ISO 8601 timestamp formatting and parsing.
//!
//! Timestamps are always written in UTC as RFC 3339 with an explicit `+00:00`
//! offset; sub-second digits appear only when non-zero. Reading accepts any
//! offset and normalises to UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Error type for timestamp parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

/// Offset-less layouts, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Formats a UTC timestamp as RFC 3339.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use surrealdb_rpc::util::format_datetime;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
/// assert_eq!(format_datetime(&at), "2024-03-01T12:30:00+00:00");
/// ```
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parses an ISO 8601 timestamp and converts it to UTC.
///
/// Accepts RFC 3339 with `Z` or a numeric offset, and offset-less timestamps,
/// which are taken to be UTC already.
pub fn parse_datetime(text: &str) -> Result<DateTime<Utc>, DateTimeParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(datetime) => Ok(datetime.with_timezone(&Utc)),
        Err(rfc_error) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| DateTimeParseError {
                message: rfc_error.to_string(),
            }),
    }
}
