use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

use super::window::SabbathWindow;
use crate::services::countdown::format_countdown;

/// Externally visible state of the clock at a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SabbathPhase {
    BeforeSabbath,
    DuringSabbath,
}

impl SabbathPhase {
    /// Window boundary the countdown is measured against in this phase.
    pub fn countdown_target(self) -> Boundary {
        match self {
            SabbathPhase::BeforeSabbath => Boundary::Start,
            SabbathPhase::DuringSabbath => Boundary::End,
        }
    }
}

/// A window boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

/// Sabbath status at a reference instant.
///
/// Recomputed on every query and never stored. Holds plain values only, so
/// it can be serialized or sent across threads as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SabbathStatus {
    is_sabbath: bool,
    phase: SabbathPhase,
    reference: DateTime<Tz>,
    window: SabbathWindow,
    next_window: SabbathWindow,
    #[serde(rename = "countdown_seconds", serialize_with = "serialize_seconds")]
    countdown: TimeDelta,
}

impl SabbathStatus {
    /// Status for a reference instant that falls inside `window`.
    pub(crate) fn during(
        reference: DateTime<Tz>,
        window: SabbathWindow,
        next_window: SabbathWindow,
    ) -> Self {
        Self {
            is_sabbath: true,
            phase: SabbathPhase::DuringSabbath,
            reference,
            window,
            next_window,
            countdown: window.end() - reference,
        }
    }

    /// Status for a reference instant before `window` opens.
    pub(crate) fn before(reference: DateTime<Tz>, window: SabbathWindow) -> Self {
        Self {
            is_sabbath: false,
            phase: SabbathPhase::BeforeSabbath,
            reference,
            window,
            next_window: window,
            countdown: window.start() - reference,
        }
    }

    pub fn is_sabbath(&self) -> bool {
        self.is_sabbath
    }

    pub fn phase(&self) -> SabbathPhase {
        self.phase
    }

    /// Instant the status was computed for.
    pub fn reference(&self) -> DateTime<Tz> {
        self.reference
    }

    /// The window the reference instant is in, or the one it is waiting for.
    pub fn window(&self) -> SabbathWindow {
        self.window
    }

    /// The next window to open: the following week's while in the Sabbath,
    /// otherwise the current window itself.
    pub fn next_window(&self) -> SabbathWindow {
        self.next_window
    }

    /// Time until the window opens (before) or closes (during).
    pub fn countdown(&self) -> TimeDelta {
        self.countdown
    }

    pub fn countdown_target(&self) -> Boundary {
        self.phase.countdown_target()
    }

    /// Human-readable countdown, e.g. "1 day, 9 hours".
    pub fn countdown_text(&self) -> String {
        format_countdown(self.countdown)
    }
}

fn serialize_seconds<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(delta.num_seconds())
}
