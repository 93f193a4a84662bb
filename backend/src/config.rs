//! Clock configuration file and environment variable handling.
//!
//! The library never reads configuration on its own: callers load a
//! [`ClockConfig`] and pass it to [`SabbathClock::from_config`].
//!
//! ```toml
//! [clock]
//! default_timezone = "America/New_York"
//! start_hour = 18
//! start_minute = 0
//!
//! [reminders]
//! preparation_start_hour = 14
//! notification_hours_before = 24
//! ```
//!
//! [`SabbathClock::from_config`]: crate::services::clock::SabbathClock::from_config

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ClockError, ClockResult};
use crate::models::preferences::{default_notification_hours_before, default_preparation_start_hour};
use crate::models::SabbathPreferences;
use crate::services::reminders::MAX_NOTIFICATION_HOURS_BEFORE;
use crate::services::sunset::DEFAULT_SUNSET_HOUR;
use crate::time::parse_timezone;

/// File name searched by [`ClockConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "sabbath.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default)]
    pub clock: ClockSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
}

/// Sabbath start settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Timezone used when a caller does not name one
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    /// Local hour standing in for Friday sunset
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default)]
    pub start_minute: u32,
}

/// Defaults for users whose profile carries no reminder preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default = "default_preparation_start_hour")]
    pub preparation_start_hour: u32,
    #[serde(default = "default_notification_hours_before")]
    pub notification_hours_before: u32,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_start_hour() -> u32 {
    DEFAULT_SUNSET_HOUR
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
            start_hour: default_start_hour(),
            start_minute: 0,
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            preparation_start_hour: default_preparation_start_hour(),
            notification_hours_before: default_notification_hours_before(),
        }
    }
}

impl FromStr for ClockConfig {
    type Err = ClockError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: ClockConfig = toml::from_str(content).map_err(|e| {
            ClockError::InvalidConfiguration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl ClockConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the file cannot be read or parsed,
    /// or if a value is out of range.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClockResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ClockError::InvalidConfiguration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        content.parse()
    }

    /// Load configuration from the first `sabbath.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when none exists.
    pub fn from_default_location() -> ClockResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Loading clock configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Apply overrides from process environment variables.
    ///
    /// # Environment Variables
    /// - `SABBATH_TIMEZONE`: default timezone
    /// - `SABBATH_START_HOUR` / `SABBATH_START_MINUTE`: sunset approximation
    /// - `SABBATH_PREPARATION_START_HOUR`: default preparation hour
    /// - `SABBATH_NOTIFICATION_HOURS_BEFORE`: default reminder lead time
    pub fn apply_env_overrides(self) -> ClockResult<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Set values win over the
    /// file; the result is validated.
    pub fn apply_overrides<F>(mut self, lookup: F) -> ClockResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tz) = lookup("SABBATH_TIMEZONE") {
            self.clock.default_timezone = tz;
        }
        if let Some(value) = lookup("SABBATH_START_HOUR") {
            self.clock.start_hour = parse_number("SABBATH_START_HOUR", &value)?;
        }
        if let Some(value) = lookup("SABBATH_START_MINUTE") {
            self.clock.start_minute = parse_number("SABBATH_START_MINUTE", &value)?;
        }
        if let Some(value) = lookup("SABBATH_PREPARATION_START_HOUR") {
            self.reminders.preparation_start_hour =
                parse_number("SABBATH_PREPARATION_START_HOUR", &value)?;
        }
        if let Some(value) = lookup("SABBATH_NOTIFICATION_HOURS_BEFORE") {
            self.reminders.notification_hours_before =
                parse_number("SABBATH_NOTIFICATION_HOURS_BEFORE", &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges and that the default timezone resolves.
    pub fn validate(&self) -> ClockResult<()> {
        if self.clock.start_hour > 23 {
            return Err(ClockError::InvalidConfiguration(format!(
                "clock.start_hour must be between 0 and 23, got {}",
                self.clock.start_hour
            )));
        }
        if self.clock.start_minute > 59 {
            return Err(ClockError::InvalidConfiguration(format!(
                "clock.start_minute must be between 0 and 59, got {}",
                self.clock.start_minute
            )));
        }
        if self.reminders.preparation_start_hour > 23 {
            return Err(ClockError::InvalidConfiguration(format!(
                "reminders.preparation_start_hour must be between 0 and 23, got {}",
                self.reminders.preparation_start_hour
            )));
        }
        if self.reminders.notification_hours_before > MAX_NOTIFICATION_HOURS_BEFORE {
            return Err(ClockError::InvalidConfiguration(format!(
                "reminders.notification_hours_before must be at most {}, got {}",
                MAX_NOTIFICATION_HOURS_BEFORE, self.reminders.notification_hours_before
            )));
        }
        parse_timezone(&self.clock.default_timezone).map_err(|_| {
            ClockError::InvalidConfiguration(format!(
                "clock.default_timezone '{}' is not a known IANA timezone",
                self.clock.default_timezone
            ))
        })?;
        Ok(())
    }

    /// The configured default timezone.
    pub fn default_timezone(&self) -> ClockResult<Tz> {
        parse_timezone(&self.clock.default_timezone)
    }

    /// Preferences for a user who has not set any.
    pub fn default_preferences(&self) -> SabbathPreferences {
        SabbathPreferences {
            preparation_start_hour: self.reminders.preparation_start_hour,
            notification_hours_before: self.reminders.notification_hours_before,
            ..SabbathPreferences::default()
        }
    }
}

fn parse_number(key: &str, value: &str) -> ClockResult<u32> {
    value.trim().parse().map_err(|_| {
        ClockError::InvalidConfiguration(format!("{} must be a non-negative integer, got '{}'", key, value))
    })
}
