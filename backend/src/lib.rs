//! # Sabbath Companion
//!
//! Sabbath timing engine for the Sabbath Companion application.
//!
//! Given a timezone and a reference instant, this crate works out the
//! Sabbath window of the week (Friday sunset to Saturday sunset), whether the
//! instant falls inside it, and how long until the relevant boundary. The
//! HTTP layer, the user store and the reminder task runner consume it; none
//! of them are part of this crate.
//!
//! ## Features
//!
//! - **Windows**: current, next, per-date and upcoming Sabbath windows
//! - **Status**: before/during state with countdown, recomputed per query
//! - **Countdown text**: "2 days, 3 hours, 10 minutes"
//! - **Reminders**: whether a user's preparation reminder is due
//! - **Checklist**: personalised preparation tasks
//!
//! ## Architecture
//!
//! - [`services`]: the clock, sunset approximation, countdown, reminders
//! - [`models`]: windows, status and user preferences
//! - [`time`]: the "now" seam and parsing of caller input
//! - [`api`]: serializable report DTOs for the HTTP layer
//! - [`config`]: TOML/environment configuration
//! - [`error`]: the error taxonomy
//!
//! ## Example
//!
//! ```
//! use chrono::TimeZone;
//! use chrono_tz::Tz;
//! use sabbath_companion::services::SabbathClock;
//!
//! let clock = SabbathClock::default();
//! let wednesday = Tz::UTC.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap();
//! let status = clock.status("UTC", Some(wednesday)).unwrap();
//!
//! assert!(!status.is_sabbath());
//! assert_eq!(status.countdown_text(), "2 days, 9 hours");
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time;

pub use config::ClockConfig;
pub use error::{ClockError, ClockResult};
pub use models::{SabbathPhase, SabbathStatus, SabbathWindow};
pub use services::{format_countdown, is_within, SabbathClock};
