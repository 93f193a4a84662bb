//! Human-readable countdown formatting.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Rendered when the countdown is under one minute.
pub const LESS_THAN_A_MINUTE: &str = "less than a minute";

/// Rendered when the target is already behind the reference instant.
pub const TIME_HAS_PASSED: &str = "time has passed";

/// A non-negative duration split into whole days, hours and minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl CountdownParts {
    /// Split `delta`; `None` when it is negative. Seconds are truncated.
    pub fn from_delta(delta: TimeDelta) -> Option<Self> {
        if delta < TimeDelta::zero() {
            return None;
        }
        let total_minutes = delta.num_minutes();
        Some(Self {
            days: total_minutes / (24 * 60),
            hours: (total_minutes / 60) % 24,
            minutes: total_minutes % 60,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

/// Format a countdown as e.g. "2 days, 3 hours, 10 minutes".
///
/// Zero components are omitted. Durations under a minute render as
/// [`LESS_THAN_A_MINUTE`] and negative ones as [`TIME_HAS_PASSED`].
pub fn format_countdown(delta: TimeDelta) -> String {
    let Some(parts) = CountdownParts::from_delta(delta) else {
        return TIME_HAS_PASSED.to_string();
    };
    if parts.is_zero() {
        return LESS_THAN_A_MINUTE.to_string();
    }

    [
        (parts.days, "day"),
        (parts.hours, "hour"),
        (parts.minutes, "minute"),
    ]
    .iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| pluralize(*value, unit))
    .collect::<Vec<_>>()
    .join(", ")
}

fn pluralize(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
