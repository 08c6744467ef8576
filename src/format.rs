//! Date parsing and display labels for chart points, table rows and filter chips.
//!
//! Timestamps carrying an offset are rendered in UTC so labels don't depend
//! on the machine's timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, Result};

/// Parse a calendar day from `YYYY-MM-DD` or a full ISO timestamp.
pub fn parse_day(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_timestamp(trimmed).map(|ts| ts.date())
}

/// Parse an ISO timestamp (RFC 3339, naive `T`-separated, or bare date).
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DashboardError::InvalidDate(s.to_string()))
}

/// `Mar 5`
pub fn day_label(day: &str) -> Result<String> {
    Ok(parse_day(day)?.format("%b %-d").to_string())
}

/// `Jan 2024`
pub fn month_label(day: &str) -> Result<String> {
    Ok(parse_day(day)?.format("%b %Y").to_string())
}

/// `Mar 5, 2024`
pub fn long_date_label(day: &str) -> Result<String> {
    Ok(parse_day(day)?.format("%b %-d, %Y").to_string())
}

/// `Mar 05, 2024`
pub fn record_date_label(timestamp: &str) -> Result<String> {
    Ok(parse_timestamp(timestamp)?.format("%b %d, %Y").to_string())
}

/// `14:30`
pub fn record_time_label(timestamp: &str) -> Result<String> {
    Ok(parse_timestamp(timestamp)?.format("%H:%M").to_string())
}
