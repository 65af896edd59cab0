//! Timestamp parsing and calendar truncation.
//!
//! All arithmetic in the tracker is timezone-naive: the backend stores naive
//! local datetimes, and anything that arrives with an offset is converted to
//! the local clock before it enters the domain.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp as sent by the backend.
///
/// Accepts naive datetimes (with or without fractional seconds), RFC 3339
/// timestamps carrying an offset, and bare dates (taken as midnight).
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Local).naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(anyhow!("Unrecognised timestamp: '{}'", value))
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => parse_timestamp(value).map(|ts| ts.date()),
    }
}

/// Signed difference `later - earlier` in fractional minutes
pub fn minutes_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    (later - earlier).num_seconds() as f64 / 60.0
}

/// Monday of the week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Human label for a calendar day relative to `today`
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if Some(date) == today.pred_opt() {
        "Yesterday".to_string()
    } else {
        date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_backend_formats() {
        assert_eq!(parse_timestamp("2025-01-05T08:00:00").unwrap(), at(2025, 1, 5, 8, 0));
        assert_eq!(parse_timestamp("2025-01-05T08:00:00.123456").unwrap().date(), at(2025, 1, 5, 8, 0).date());
        assert_eq!(parse_timestamp("2025-01-05 08:00:00").unwrap(), at(2025, 1, 5, 8, 0));
        assert_eq!(parse_timestamp("2025-01-05").unwrap(), at(2025, 1, 5, 0, 0));
        assert!(parse_timestamp("2025-01-05T08:00:00+00:00").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday-ish").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // 2025-01-05 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(start_of_week(sunday), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn test_relative_day_labels() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(relative_day_label(today, today), "Today");
        assert_eq!(relative_day_label(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), today), "Yesterday");
        assert_eq!(
            relative_day_label(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), today),
            "January 5, 2025"
        );
    }

    #[test]
    fn test_minutes_between() {
        assert_eq!(minutes_between(at(2025, 1, 5, 8, 0), at(2025, 1, 5, 11, 0)), 180.0);
        assert_eq!(minutes_between(at(2025, 1, 5, 11, 0), at(2025, 1, 5, 8, 0)), -180.0);
    }
}
