//! Sabbath start ("sunset") computation.
//!
//! The fixed-hour provider stands in for true sunset. A location-aware
//! provider backed by an astronomical calculation can be plugged into the
//! clock by implementing [`SunsetProvider`].

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::error::{ClockError, ClockResult};

/// Local hour used as the sunset approximation when none is configured.
pub const DEFAULT_SUNSET_HOUR: u32 = 18;

/// Largest DST gap searched when placing a wall-clock time, in quarter hours.
const MAX_GAP_STEPS: i64 = 24;

/// Produces the instant the Sabbath opens on a given Friday.
pub trait SunsetProvider: Send + Sync + std::fmt::Debug {
    fn sabbath_start(&self, friday: NaiveDate, tz: Tz) -> ClockResult<DateTime<Tz>>;
}

/// Sunset approximated as a fixed local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHourSunset {
    hour: u32,
    minute: u32,
}

impl FixedHourSunset {
    pub fn new(hour: u32, minute: u32) -> ClockResult<Self> {
        if hour > 23 {
            return Err(ClockError::InvalidConfiguration(format!(
                "sunset hour must be between 0 and 23, got {}",
                hour
            )));
        }
        if minute > 59 {
            return Err(ClockError::InvalidConfiguration(format!(
                "sunset minute must be between 0 and 59, got {}",
                minute
            )));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl Default for FixedHourSunset {
    fn default() -> Self {
        Self {
            hour: DEFAULT_SUNSET_HOUR,
            minute: 0,
        }
    }
}

impl SunsetProvider for FixedHourSunset {
    fn sabbath_start(&self, friday: NaiveDate, tz: Tz) -> ClockResult<DateTime<Tz>> {
        local_instant(tz, friday, self.hour, self.minute)
    }
}

/// Place a local wall-clock time on `date` in `tz`.
///
/// Ambiguous times (DST overlap) resolve to the earlier instant. Times inside
/// a DST gap resolve to the first wall-clock quarter hour after the gap.
pub fn local_instant(tz: Tz, date: NaiveDate, hour: u32, minute: u32) -> ClockResult<DateTime<Tz>> {
    let nonexistent = || ClockError::NonexistentLocalTime {
        date,
        hour,
        minute,
        timezone: tz.name().to_string(),
    };
    let naive = date.and_hms_opt(hour, minute, 0).ok_or_else(nonexistent)?;

    if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
        return Ok(instant);
    }

    log::trace!("{} {:02}:{:02} falls in a DST gap in {}", date, hour, minute, tz.name());
    (1..=MAX_GAP_STEPS)
        .find_map(|step| {
            let shifted = naive.checked_add_signed(TimeDelta::minutes(15 * step))?;
            tz.from_local_datetime(&shifted).earliest()
        })
        .ok_or_else(nonexistent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_six_pm() {
        let sunset = FixedHourSunset::default();
        let start = sunset.sabbath_start(date(2026, 10, 16), Tz::UTC).unwrap();
        assert_eq!(start, Tz::UTC.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_custom_hour_in_zone() {
        let sunset = FixedHourSunset::new(19, 30).unwrap();
        let tz = Tz::Europe__Berlin;
        let start = sunset.sabbath_start(date(2026, 6, 19), tz).unwrap();

        assert_eq!(start.hour(), 19);
        assert_eq!(start.minute(), 30);
        assert_eq!(start.timezone(), tz);
        // CEST is UTC+2
        assert_eq!(start.naive_utc().hour(), 17);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            FixedHourSunset::new(24, 0),
            Err(ClockError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            FixedHourSunset::new(18, 60),
            Err(ClockError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_gap_moves_forward() {
        // New York springs forward at 02:00 on 2026-03-08
        let tz = Tz::America__New_York;
        let instant = local_instant(tz, date(2026, 3, 8), 2, 30).unwrap();
        assert_eq!(instant.hour(), 3);
        assert_eq!(instant.minute(), 0);
    }

    #[test]
    fn test_overlap_takes_earlier() {
        // New York falls back at 02:00 on 2026-11-01, repeating 01:xx
        let tz = Tz::America__New_York;
        let instant = local_instant(tz, date(2026, 11, 1), 1, 30).unwrap();
        // 01:30 EDT is 05:30 UTC; 01:30 EST would be 06:30 UTC
        assert_eq!(instant.naive_utc().hour(), 5);
    }
}
