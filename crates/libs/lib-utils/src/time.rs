//! # Time Utilities
//!
//! Timestamp helpers using chrono. The backend emits both RFC3339 values and
//! zone-less local date-times (`2024-03-01T10:15:30`), so parsing accepts both.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse RFC3339 string to UTC DateTime.
pub fn parse_utc(moment: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(moment)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::FailToDateParse(moment.to_string()))
}

/// Parse a backend timestamp in any of the accepted shapes.
///
/// Zone-less values are read as UTC. A bare date is taken at midnight.
pub fn parse_timestamp(moment: &str) -> Result<DateTime<Utc>, Error> {
    let moment = moment.trim();
    if let Ok(dt) = parse_utc(moment) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(moment, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(moment, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(moment, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::FailToDateParse(moment.to_string()))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToDateParse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-03-01T10:15:30Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_local_datetime_with_fraction() {
        let dt = parse_timestamp("2024-03-01T10:15:30.123456").unwrap();
        assert_eq!(dt.minute(), 15);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_text() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
