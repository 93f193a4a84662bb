//! Error types for Sabbath clock operations.
//!
//! Every failure here is a deterministic function of the caller's input:
//! nothing is retryable and nothing is partially applied.

/// Result type for clock operations
pub type ClockResult<T> = Result<T, ClockError>;

/// Error type for clock, parsing and configuration operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The timezone identifier could not be resolved to an IANA zone.
    #[error("Invalid timezone: '{0}'")]
    InvalidTimezone(String),

    /// A caller-supplied date/time string could not be parsed.
    #[error("Invalid reference instant '{input}': {reason}")]
    InvalidReferenceInstant { input: String, reason: String },

    /// Out-of-range configuration values or an unreadable config file.
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// A wall-clock time does not exist on the given date in the given zone.
    #[error("Local time {date} {hour:02}:{minute:02} does not exist in {timezone}")]
    NonexistentLocalTime {
        date: chrono::NaiveDate,
        hour: u32,
        minute: u32,
        timezone: String,
    },
}

impl ClockError {
    /// Build an `InvalidReferenceInstant` error.
    pub fn invalid_reference(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ClockError::InvalidReferenceInstant {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Build the error for a date whose week cannot be represented.
    pub fn date_out_of_range(date: chrono::NaiveDate) -> Self {
        Self::invalid_reference(date.to_string(), "date is outside the supported range")
    }

    /// Whether the error was caused by the request itself (maps to 400 in an
    /// HTTP layer) rather than by deployment configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClockError::InvalidTimezone(_) | ClockError::InvalidReferenceInstant { .. }
        )
    }

    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ClockError::InvalidTimezone(_) => "INVALID_TIMEZONE",
            ClockError::InvalidReferenceInstant { .. } => "INVALID_REFERENCE_INSTANT",
            ClockError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            ClockError::NonexistentLocalTime { .. } => "NONEXISTENT_LOCAL_TIME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timezone_display() {
        let err = ClockError::InvalidTimezone("Mars/Olympus_Mons".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: 'Mars/Olympus_Mons'");
        assert_eq!(err.code(), "INVALID_TIMEZONE");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_reference_display() {
        let err = ClockError::invalid_reference("yesterday", "unsupported format");
        assert_eq!(
            err.to_string(),
            "Invalid reference instant 'yesterday': unsupported format"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_configuration_errors_are_not_client_errors() {
        let err = ClockError::InvalidConfiguration("start_hour must be < 24".to_string());
        assert!(!err.is_client_error());
        assert_eq!(err.code(), "INVALID_CONFIGURATION");

        let err = ClockError::NonexistentLocalTime {
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            hour: 2,
            minute: 30,
            timezone: "America/New_York".to_string(),
        };
        assert!(!err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Local time 2026-03-08 02:30 does not exist in America/New_York"
        );
    }
}
