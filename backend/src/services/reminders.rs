//! Preparation reminder scheduling.
//!
//! The task runner asks, per user and per tick, whether a "time to prepare
//! for Sabbath" reminder is due. Delivery, deduplication and retries stay
//! with the runner.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{ClockError, ClockResult};
use crate::models::{SabbathPreferences, SabbathWindow, UserSabbathProfile};
use crate::services::clock::SabbathClock;
use crate::services::sunset::local_instant;
use crate::time::parse_timezone;

/// Longest accepted lead time between the reminder and preparation: one week.
pub const MAX_NOTIFICATION_HOURS_BEFORE: u32 = 7 * 24;

/// When preparation starts and how far ahead the reminder opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    preparation_start_hour: u32,
    notification_hours_before: u32,
}

impl ReminderPolicy {
    pub fn new(preparation_start_hour: u32, notification_hours_before: u32) -> ClockResult<Self> {
        if preparation_start_hour > 23 {
            return Err(ClockError::InvalidConfiguration(format!(
                "preparation_start_hour must be between 0 and 23, got {}",
                preparation_start_hour
            )));
        }
        if notification_hours_before > MAX_NOTIFICATION_HOURS_BEFORE {
            return Err(ClockError::InvalidConfiguration(format!(
                "notification_hours_before must be at most {}, got {}",
                MAX_NOTIFICATION_HOURS_BEFORE, notification_hours_before
            )));
        }
        Ok(Self {
            preparation_start_hour,
            notification_hours_before,
        })
    }

    pub fn from_preferences(preferences: &SabbathPreferences) -> ClockResult<Self> {
        Self::new(
            preferences.preparation_start_hour,
            preferences.notification_hours_before,
        )
    }

    pub fn preparation_start_hour(&self) -> u32 {
        self.preparation_start_hour
    }

    pub fn notification_hours_before(&self) -> u32 {
        self.notification_hours_before
    }

    /// Decide whether the reminder for the current window is due at `reference`.
    ///
    /// Preparation starts on the window's Friday at the preparation hour;
    /// the reminder is due from `notification_hours_before` hours earlier
    /// up to, but not including, that moment.
    pub fn evaluate(
        &self,
        clock: &SabbathClock,
        reference: &DateTime<Tz>,
    ) -> ClockResult<ReminderDecision> {
        let window = clock.window_at(reference)?;
        let preparation_starts_at = local_instant(
            reference.timezone(),
            window.friday(),
            self.preparation_start_hour,
            0,
        )?;
        let reminder_opens_at = preparation_starts_at
            .checked_sub_signed(TimeDelta::hours(i64::from(self.notification_hours_before)))
            .ok_or_else(|| {
                ClockError::InvalidConfiguration(format!(
                    "reminder {} hours before {} is out of range",
                    self.notification_hours_before, preparation_starts_at
                ))
            })?;
        let due = reminder_opens_at <= *reference && *reference < preparation_starts_at;

        log::debug!(
            "reminder for {} window: opens {}, preparation {}, due={}",
            window.friday(),
            reminder_opens_at,
            preparation_starts_at,
            due
        );

        Ok(ReminderDecision {
            due,
            preparation_starts_at,
            reminder_opens_at,
            window,
        })
    }
}

/// Outcome of a reminder check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderDecision {
    pub due: bool,
    pub preparation_starts_at: DateTime<Tz>,
    pub reminder_opens_at: DateTime<Tz>,
    pub window: SabbathWindow,
}

/// Check whether a user's preparation reminder is due at `reference` (or now).
pub fn reminder_due(
    clock: &SabbathClock,
    profile: &UserSabbathProfile,
    reference: Option<DateTime<Tz>>,
) -> ClockResult<ReminderDecision> {
    let tz = parse_timezone(&profile.timezone)?;
    let policy = ReminderPolicy::from_preferences(&profile.preferences)?;
    let reference = match reference {
        Some(instant) => instant.with_timezone(&tz),
        None => clock.now_in(tz),
    };
    policy.evaluate(clock, &reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(2026, 10, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_default_policy_window() {
        let clock = SabbathClock::default();
        let profile = UserSabbathProfile::new("UTC");

        // Thursday 13:59 -> not yet; Thursday 14:00 -> due
        let early = reminder_due(&clock, &profile, Some(at(15, 13, 59))).unwrap();
        assert!(!early.due);
        assert_eq!(early.reminder_opens_at, at(15, 14, 0));
        assert_eq!(early.preparation_starts_at, at(16, 14, 0));

        let opening = reminder_due(&clock, &profile, Some(at(15, 14, 0))).unwrap();
        assert!(opening.due);
    }

    #[test]
    fn test_not_due_once_preparation_started() {
        let clock = SabbathClock::default();
        let profile = UserSabbathProfile::new("UTC");

        assert!(reminder_due(&clock, &profile, Some(at(16, 13, 59))).unwrap().due);
        assert!(!reminder_due(&clock, &profile, Some(at(16, 14, 0))).unwrap().due);
        assert!(!reminder_due(&clock, &profile, Some(at(16, 19, 0))).unwrap().due);
    }

    #[test]
    fn test_friday_morning_targets_same_day() {
        let clock = SabbathClock::default();
        let profile = UserSabbathProfile::new("UTC");

        let decision = reminder_due(&clock, &profile, Some(at(16, 9, 0))).unwrap();
        assert!(decision.due);
        assert_eq!(decision.window.friday(), at(16, 0, 0).date_naive());
    }

    #[test]
    fn test_custom_preferences() {
        let clock = SabbathClock::default();
        let preferences = SabbathPreferences {
            preparation_start_hour: 10,
            notification_hours_before: 2,
            ..SabbathPreferences::default()
        };
        let profile = UserSabbathProfile::new("America/New_York").with_preferences(preferences);

        // 2026-10-16 13:30 UTC is 09:30 EDT, inside 08:00..10:00 local
        let decision = reminder_due(&clock, &profile, Some(at(16, 13, 30))).unwrap();
        assert!(decision.due);
        assert_eq!(decision.preparation_starts_at.timezone(), Tz::America__New_York);

        // 11:30 UTC is 07:30 EDT, too early
        assert!(!reminder_due(&clock, &profile, Some(at(16, 11, 30))).unwrap().due);
    }

    #[test]
    fn test_invalid_inputs() {
        let clock = SabbathClock::default();
        let profile = UserSabbathProfile::new("Nowhere/Special");
        assert!(matches!(
            reminder_due(&clock, &profile, None),
            Err(ClockError::InvalidTimezone(_))
        ));

        assert!(matches!(
            ReminderPolicy::new(24, 1),
            Err(ClockError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_huge_lead_time_is_rejected() {
        let clock = SabbathClock::default();
        let profile: UserSabbathProfile = serde_json::from_str(
            r#"{"timezone": "UTC", "sabbath_preferences": {"notification_hours_before": 4294967295}}"#,
        )
        .unwrap();

        let err = reminder_due(&clock, &profile, Some(at(14, 9, 0))).unwrap_err();
        assert!(matches!(err, ClockError::InvalidConfiguration(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_week_long_lead_time_is_accepted() {
        let clock = SabbathClock::default();
        let policy = ReminderPolicy::new(14, MAX_NOTIFICATION_HOURS_BEFORE).unwrap();

        // Opens the previous Friday at 14:00, so a Wednesday reference is inside
        let decision = policy.evaluate(&clock, &at(14, 9, 0)).unwrap();
        assert!(decision.due);
        assert_eq!(decision.reminder_opens_at, at(9, 14, 0));
        assert!(ReminderPolicy::new(14, MAX_NOTIFICATION_HOURS_BEFORE + 1).is_err());
    }
}
