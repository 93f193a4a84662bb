//! Parsing of caller-supplied timezones, instants and dates.
//!
//! Accepted reference formats:
//! - RFC 3339 with an offset or `Z` (`2026-10-16T19:00:00Z`,
//!   `2026-10-16T19:00:00-04:00`), converted into the target zone
//! - the same with a space separator (`2026-10-16 19:00:00+02:00`)
//! - a calendar date (`2026-10-16`)
//!
//! Date-times without an offset are rejected: a naive wall-clock time is
//! never silently mixed with zone-aware instants. Years outside 0001-9999
//! are rejected as well.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::error::{ClockError, ClockResult};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// A parsed reference: either an exact instant or a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Instant(DateTime<Tz>),
    Date(NaiveDate),
}

impl Reference {
    /// Calendar year of the reference, in its own timezone.
    pub fn year(&self) -> i32 {
        match self {
            Reference::Instant(instant) => instant.year(),
            Reference::Date(date) => date.year(),
        }
    }
}

/// Resolve an IANA timezone identifier such as `America/New_York`.
pub fn parse_timezone(input: &str) -> ClockResult<Tz> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClockError::InvalidTimezone(input.to_string()));
    }
    trimmed
        .parse::<Tz>()
        .map_err(|_| ClockError::InvalidTimezone(trimmed.to_string()))
}

/// Parse a reference instant or date, placing instants in `tz`.
pub fn parse_reference(input: &str, tz: Tz) -> ClockResult<Reference> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClockError::invalid_reference(input, "empty input"));
    }

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .map(|instant| Reference::Instant(instant.with_timezone(&tz)))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map(Reference::Date));
    if let Ok(reference) = parsed {
        if !SUPPORTED_YEARS.contains(&reference.year()) {
            return Err(ClockError::invalid_reference(
                trimmed,
                "year must be between 0001 and 9999",
            ));
        }
        return Ok(reference);
    }

    let reason = if NAIVE_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
    {
        "missing UTC offset; use RFC 3339 such as 2026-10-16T18:00:00Z"
    } else {
        "expected an RFC 3339 timestamp or a YYYY-MM-DD date"
    };
    Err(ClockError::invalid_reference(trimmed, reason))
}

/// Parse a reference that must be an exact instant.
pub fn parse_instant(input: &str, tz: Tz) -> ClockResult<DateTime<Tz>> {
    match parse_reference(input, tz)? {
        Reference::Instant(instant) => Ok(instant),
        Reference::Date(_) => Err(ClockError::invalid_reference(
            input.trim(),
            "a time of day and UTC offset are required",
        )),
    }
}
