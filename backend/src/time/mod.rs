//! Time handling: the "now" seam and parsing of caller input.

pub mod parsing;
pub mod source;

pub use parsing::{parse_instant, parse_reference, parse_timezone, Reference};
pub use source::{FixedTimeSource, SystemTimeSource, TimeSource};
