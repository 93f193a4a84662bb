//! Public API surface for the Sabbath clock.
//!
//! This file consolidates the DTO types handed to the HTTP layer.
//! All types derive Serialize/Deserialize for JSON serialization; instants
//! are RFC 3339 strings carrying the local offset.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ClockError;
use crate::models::{Boundary, SabbathPhase, SabbathStatus, SabbathWindow};
use crate::services::countdown::format_countdown;
use crate::services::reminders::ReminderDecision;

pub use crate::models::{SabbathPreferences, UserSabbathProfile};
pub use crate::services::checklist::PreparationChecklist;

fn rfc3339(instant: &DateTime<Tz>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// One Sabbath window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowReport {
    pub timezone: String,
    /// Friday the window opens on (YYYY-MM-DD)
    pub friday: String,
    pub start: String,
    pub end: String,
}

impl From<&SabbathWindow> for WindowReport {
    fn from(window: &SabbathWindow) -> Self {
        Self {
            timezone: window.timezone().name().to_string(),
            friday: window.friday().format("%Y-%m-%d").to_string(),
            start: rfc3339(&window.start()),
            end: rfc3339(&window.end()),
        }
    }
}

/// Sabbath status at a reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub timezone: String,
    pub is_sabbath: bool,
    pub phase: SabbathPhase,
    pub reference: String,
    pub window: WindowReport,
    pub next_window: WindowReport,
    /// Whole seconds until `countdown_target`
    pub countdown_seconds: i64,
    /// Formatted countdown, e.g. "1 day, 4 hours"
    pub countdown: String,
    pub countdown_target: Boundary,
}

impl From<&SabbathStatus> for StatusReport {
    fn from(status: &SabbathStatus) -> Self {
        Self {
            timezone: status.window().timezone().name().to_string(),
            is_sabbath: status.is_sabbath(),
            phase: status.phase(),
            reference: rfc3339(&status.reference()),
            window: WindowReport::from(&status.window()),
            next_window: WindowReport::from(&status.next_window()),
            countdown_seconds: status.countdown().num_seconds(),
            countdown: format_countdown(status.countdown()),
            countdown_target: status.countdown_target(),
        }
    }
}

/// Outcome of a reminder check for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderReport {
    pub due: bool,
    pub reminder_opens_at: String,
    pub preparation_starts_at: String,
    pub window: WindowReport,
}

impl From<&ReminderDecision> for ReminderReport {
    fn from(decision: &ReminderDecision) -> Self {
        Self {
            due: decision.due,
            reminder_opens_at: rfc3339(&decision.reminder_opens_at),
            preparation_starts_at: rfc3339(&decision.preparation_starts_at),
            window: WindowReport::from(&decision.window),
        }
    }
}

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&ClockError> for ApiError {
    fn from(err: &ClockError) -> Self {
        let error = ApiError::new(err.code(), err.to_string());
        match err {
            ClockError::InvalidReferenceInstant { reason, .. } => error.with_details(reason.clone()),
            _ => error,
        }
    }
}

/// HTTP status an API layer should answer with for `err`.
pub fn status_code_for(err: &ClockError) -> u16 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}
