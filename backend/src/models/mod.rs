//! Domain values produced and consumed by the clock.
//!
//! - [`SabbathWindow`]: one Friday-sunset to Saturday-sunset period
//! - [`SabbathStatus`]: derived per-query status, never stored
//! - [`SabbathPreferences`] / [`UserSabbathProfile`]: what the external
//!   profile store hands over

pub mod preferences;
pub mod status;
pub mod window;

pub use preferences::{SabbathPreferences, UserSabbathProfile};
pub use status::{Boundary, SabbathPhase, SabbathStatus};
pub use window::{sabbath_length, SabbathWindow, SABBATH_LENGTH_HOURS, SABBATH_START_WEEKDAY};
