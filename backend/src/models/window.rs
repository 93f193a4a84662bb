use chrono::{DateTime, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{ClockError, ClockResult};

/// Weekday on which the Sabbath begins (at sunset).
///
/// Friday-evening to Saturday-evening is the authoritative convention; the
/// Saturday-evening variant is not supported.
pub const SABBATH_START_WEEKDAY: Weekday = Weekday::Fri;

/// Length of every Sabbath window, in hours.
pub const SABBATH_LENGTH_HOURS: i64 = 24;

/// Length of every Sabbath window.
pub fn sabbath_length() -> TimeDelta {
    TimeDelta::hours(SABBATH_LENGTH_HOURS)
}

/// One Sabbath observance period, Friday sunset to Saturday sunset.
///
/// `end - start` is always exactly [`SABBATH_LENGTH_HOURS`] hours of elapsed
/// time, so across a DST change the local wall-clock end differs from the
/// start by an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SabbathWindow {
    friday: NaiveDate,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl SabbathWindow {
    /// Create the window that opens at `start` on the given Friday.
    ///
    /// Fails when the end falls outside the representable range.
    pub fn starting_at(friday: NaiveDate, start: DateTime<Tz>) -> ClockResult<Self> {
        let end = start
            .checked_add_signed(sabbath_length())
            .ok_or_else(|| ClockError::date_out_of_range(friday))?;
        Ok(Self { friday, start, end })
    }

    /// Local calendar date of the Friday the window opens on.
    pub fn friday(&self) -> NaiveDate {
        self.friday
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// Timezone the window was computed in.
    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// True iff `start <= instant <= end`. Both boundaries are inclusive.
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// True if the window has not opened yet at `instant`.
    pub fn is_upcoming(&self, instant: &DateTime<Tz>) -> bool {
        *instant < self.start
    }

    /// True if the window closed before `instant`.
    pub fn has_ended(&self, instant: &DateTime<Tz>) -> bool {
        *instant > self.end
    }
}
