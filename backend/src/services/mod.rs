//! Service layer: the clock and the computations built on it.
//!
//! Everything here is pure and synchronous. Services take a reference
//! instant (or read one from the clock's time source) and return plain
//! values for the caller to serialize.

pub mod checklist;
pub mod clock;
pub mod countdown;
pub mod reminders;
pub mod sunset;

pub use checklist::PreparationChecklist;
pub use clock::{is_within, SabbathClock};
pub use countdown::{format_countdown, CountdownParts, LESS_THAN_A_MINUTE, TIME_HAS_PASSED};
pub use reminders::{
    reminder_due, ReminderDecision, ReminderPolicy, MAX_NOTIFICATION_HOURS_BEFORE,
};
pub use sunset::{local_instant, FixedHourSunset, SunsetProvider, DEFAULT_SUNSET_HOUR};
