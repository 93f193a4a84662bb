//! Sabbath window and status computation.
//!
//! [`SabbathClock`] is a pure calculator: every query is recomputed from the
//! reference instant, nothing is cached, and the only inputs besides the
//! arguments are the sunset approximation and the "now" source it was built
//! with. A clock can be shared freely across threads.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::config::ClockConfig;
use crate::error::{ClockError, ClockResult};
use crate::models::{SabbathStatus, SabbathWindow, SABBATH_START_WEEKDAY};
use crate::services::sunset::{FixedHourSunset, SunsetProvider};
use crate::time::{parse_timezone, SystemTimeSource, TimeSource};

const DAYS_PER_WEEK: u64 = 7;

/// Computes Sabbath windows and status for any timezone.
#[derive(Debug, Clone)]
pub struct SabbathClock {
    sunset: Arc<dyn SunsetProvider>,
    time_source: Arc<dyn TimeSource>,
}

impl Default for SabbathClock {
    fn default() -> Self {
        Self::new(FixedHourSunset::default())
    }
}

impl SabbathClock {
    /// Create a clock reading the system time.
    pub fn new(sunset: impl SunsetProvider + 'static) -> Self {
        Self {
            sunset: Arc::new(sunset),
            time_source: Arc::new(SystemTimeSource),
        }
    }

    /// Create a clock from configuration, validating the sunset time.
    pub fn from_config(config: &ClockConfig) -> ClockResult<Self> {
        let sunset = FixedHourSunset::new(config.clock.start_hour, config.clock.start_minute)?;
        Ok(Self::new(sunset))
    }

    /// Replace the source of "now".
    pub fn with_time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = Arc::new(time_source);
        self
    }

    /// Current instant in `tz`, as seen by this clock.
    pub fn now_in(&self, tz: Tz) -> DateTime<Tz> {
        self.time_source.now_utc().with_timezone(&tz)
    }

    fn reference_in(&self, tz: Tz, reference: Option<DateTime<Tz>>) -> DateTime<Tz> {
        match reference {
            Some(instant) => instant.with_timezone(&tz),
            None => self.now_in(tz),
        }
    }

    /// Window opening on the given Friday.
    fn window_on(&self, friday: NaiveDate, tz: Tz) -> ClockResult<SabbathWindow> {
        let start = self.sunset.sabbath_start(friday, tz)?;
        SabbathWindow::starting_at(friday, start)
    }

    /// The window containing `reference`, or the next one to open after it.
    ///
    /// Anchors on the most recent Friday on or before the reference date.
    /// If the reference is at or before that window's end (inclusive), that
    /// is the current window; otherwise it is the one a week later. For a
    /// Sunday through Friday reference this is the Friday at or after the
    /// reference date.
    pub fn window_at(&self, reference: &DateTime<Tz>) -> ClockResult<SabbathWindow> {
        let tz = reference.timezone();
        let date = reference.date_naive();
        let days_since_friday = (date.weekday().num_days_from_monday() + 7
            - SABBATH_START_WEEKDAY.num_days_from_monday())
            % 7;
        let anchor = date
            .checked_sub_days(Days::new(u64::from(days_since_friday)))
            .ok_or_else(|| ClockError::date_out_of_range(date))?;

        let window = self.window_on(anchor, tz)?;
        if window.has_ended(reference) {
            let window = self.following(&window)?;
            log::trace!(
                "reference {} is past the {} window, using {}",
                reference,
                anchor,
                window.friday()
            );
            return Ok(window);
        }
        Ok(window)
    }

    /// The window one week after `window`, in the same timezone.
    pub fn following(&self, window: &SabbathWindow) -> ClockResult<SabbathWindow> {
        let friday = window
            .friday()
            .checked_add_days(Days::new(DAYS_PER_WEEK))
            .ok_or_else(|| ClockError::date_out_of_range(window.friday()))?;
        self.window_on(friday, window.timezone())
    }

    /// The current or next window for `timezone` at `reference` (or now).
    pub fn current_window(
        &self,
        timezone: &str,
        reference: Option<DateTime<Tz>>,
    ) -> ClockResult<SabbathWindow> {
        let tz = parse_timezone(timezone)?;
        self.window_at(&self.reference_in(tz, reference))
    }

    /// The Sabbath observed in the week of `date`: the window containing
    /// local midnight of that date, or the next one to open after it.
    pub fn window_for_date(&self, timezone: &str, date: NaiveDate) -> ClockResult<SabbathWindow> {
        let tz = parse_timezone(timezone)?;
        let midnight = crate::services::sunset::local_instant(tz, date, 0, 0)?;
        self.window_at(&midnight)
    }

    /// The current window followed by the next `count - 1` weekly windows.
    pub fn upcoming_windows(
        &self,
        timezone: &str,
        reference: Option<DateTime<Tz>>,
        count: usize,
    ) -> ClockResult<Vec<SabbathWindow>> {
        let mut windows = Vec::with_capacity(count);
        if count == 0 {
            return Ok(windows);
        }
        let mut window = self.current_window(timezone, reference)?;
        windows.push(window);
        for _ in 1..count {
            window = self.following(&window)?;
            windows.push(window);
        }
        Ok(windows)
    }

    /// Status of the Sabbath at `reference`, in the reference's timezone.
    pub fn status_at(&self, reference: &DateTime<Tz>) -> ClockResult<SabbathStatus> {
        let mut window = self.window_at(reference)?;

        if is_within(&window, reference) {
            let next = self.following(&window)?;
            log::debug!(
                "{} is inside the Sabbath window {} .. {}",
                reference,
                window.start(),
                window.end()
            );
            return Ok(SabbathStatus::during(*reference, window, next));
        }

        // Countdown must stay non-negative: a closed window is replaced by
        // the following one.
        if window.has_ended(reference) {
            window = self.following(&window)?;
        }
        log::debug!("{} is before the Sabbath window opening {}", reference, window.start());
        Ok(SabbathStatus::before(*reference, window))
    }

    /// Status of the Sabbath for `timezone` at `reference` (or now).
    pub fn status(
        &self,
        timezone: &str,
        reference: Option<DateTime<Tz>>,
    ) -> ClockResult<SabbathStatus> {
        let tz = parse_timezone(timezone)?;
        self.status_at(&self.reference_in(tz, reference))
    }
}

/// True iff `window.start <= instant <= window.end`.
pub fn is_within<T: TimeZone>(window: &SabbathWindow, instant: &DateTime<T>) -> bool {
    let instant = instant.with_timezone(&window.timezone());
    window.contains(&instant)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
