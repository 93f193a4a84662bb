use chrono::{DateTime, Utc};

/// Source of "now" for the clock.
///
/// The clock never reads ambient time except through this trait, so callers
/// can pin a request's instant and tests stay deterministic.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimeSource(DateTime<Utc>);

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl TimeSource for FixedTimeSource {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_source_is_stable() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap();
        let source = FixedTimeSource::new(instant);
        assert_eq!(source.now_utc(), instant);
        assert_eq!(source.now_utc(), source.now_utc());
    }

    #[test]
    fn test_system_source_moves_forward() {
        let source = SystemTimeSource;
        let first = source.now_utc();
        let second = source.now_utc();
        assert!(second >= first);
    }
}
