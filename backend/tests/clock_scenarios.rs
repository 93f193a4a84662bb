//! End-to-end scenarios for the Sabbath clock.

mod support;

use chrono::{TimeDelta, Utc};
use chrono_tz::Tz;
use sabbath_companion::api::StatusReport;
use sabbath_companion::services::{format_countdown, is_within, SabbathClock};
use sabbath_companion::time::{parse_reference, FixedTimeSource, Reference};
use sabbath_companion::{ClockConfig, SabbathPhase};

use support::october;

/// Wednesday 09:00 UTC: waiting for Friday 18:00
#[test]
fn test_wednesday_morning_utc() {
    let clock = SabbathClock::default();
    let reference = october(Tz::UTC, 14, 9, 0, 0);

    let window = clock.current_window("UTC", Some(reference)).unwrap();
    assert_eq!(window.start(), october(Tz::UTC, 16, 18, 0, 0));
    assert_eq!(window.end(), october(Tz::UTC, 17, 18, 0, 0));

    let status = clock.status("UTC", Some(reference)).unwrap();
    assert!(!status.is_sabbath());
    assert_eq!(
        status.countdown(),
        october(Tz::UTC, 16, 18, 0, 0) - october(Tz::UTC, 14, 9, 0, 0)
    );
}

/// Friday 19:00 UTC: inside, counting down to Saturday 18:00
#[test]
fn test_friday_evening_utc() {
    let clock = SabbathClock::default();
    let reference = october(Tz::UTC, 16, 19, 0, 0);

    let status = clock.status("UTC", Some(reference)).unwrap();
    assert!(status.is_sabbath());
    assert_eq!(status.countdown(), october(Tz::UTC, 17, 18, 0, 0) - reference);
}

/// Saturday 18:00:00 exactly: still inside, nothing left on the countdown
#[test]
fn test_exact_saturday_end_utc() {
    let clock = SabbathClock::default();
    let status = clock
        .status("UTC", Some(october(Tz::UTC, 17, 18, 0, 0)))
        .unwrap();

    assert!(status.is_sabbath());
    assert_eq!(status.countdown(), TimeDelta::zero());
    assert_eq!(format_countdown(status.countdown()), "less than a minute");
}

#[test]
fn test_window_boundaries_are_inclusive() {
    let clock = SabbathClock::default();
    let window = clock
        .current_window("Australia/Sydney", Some(october(Tz::UTC, 14, 9, 0, 0)))
        .unwrap();

    assert!(is_within(&window, &window.start()));
    assert!(is_within(&window, &window.end()));
    assert!(!is_within(&window, &(window.end() + TimeDelta::milliseconds(1))));
    // Comparison is by absolute instant, whatever zone the instant is in
    assert!(is_within(&window, &window.start().with_timezone(&Utc)));
}

#[test]
fn test_week_of_transitions() {
    let clock = SabbathClock::default();
    let tz = Tz::America__Chicago;

    let expectations = [
        (october(tz, 16, 17, 59, 59), SabbathPhase::BeforeSabbath),
        (october(tz, 16, 18, 0, 0), SabbathPhase::DuringSabbath),
        (october(tz, 17, 12, 0, 0), SabbathPhase::DuringSabbath),
        (october(tz, 17, 18, 0, 0), SabbathPhase::DuringSabbath),
        (october(tz, 17, 18, 0, 1), SabbathPhase::BeforeSabbath),
    ];
    for (reference, phase) in expectations {
        let status = clock.status_at(&reference).unwrap();
        assert_eq!(status.phase(), phase, "at {reference}");
    }
}

#[test]
fn test_clock_driven_by_time_source() {
    let now = october(Tz::UTC, 17, 12, 0, 0).with_timezone(&Utc);
    let clock = SabbathClock::default().with_time_source(FixedTimeSource::new(now));

    let report = StatusReport::from(&clock.status("Europe/Lisbon", None).unwrap());
    assert!(report.is_sabbath);
    assert_eq!(report.timezone, "Europe/Lisbon");
    // Lisbon is UTC+1 (WEST) on 2026-10-17: 13:00 local, 5 hours to go
    assert_eq!(report.countdown, "5 hours");
    assert_eq!(report.countdown_seconds, 5 * 3600);
}

#[test]
fn test_explicit_date_lookup() {
    let clock = SabbathClock::default();
    let tz = Tz::Europe__Berlin;

    let Reference::Date(date) = parse_reference("2026-12-26", tz).unwrap() else {
        panic!("expected a date");
    };
    let window = clock.window_for_date(tz.name(), date).unwrap();
    assert_eq!(window.friday().to_string(), "2026-12-25");
    assert_eq!(window.start().to_rfc3339(), "2026-12-25T18:00:00+01:00");
}

#[test]
fn test_configured_start_time() {
    let config: ClockConfig = "[clock]\nstart_hour = 17\nstart_minute = 30\n"
        .parse()
        .unwrap();
    let clock = SabbathClock::from_config(&config).unwrap();

    let status = clock
        .status("UTC", Some(october(Tz::UTC, 16, 17, 45, 0)))
        .unwrap();
    assert!(status.is_sabbath());
    assert_eq!(status.window().start(), october(Tz::UTC, 16, 17, 30, 0));
    assert_eq!(status.countdown_text(), "23 hours, 45 minutes");
}

#[test]
fn test_shared_clock_across_threads() {
    let clock = SabbathClock::default();
    let reference = october(Tz::UTC, 15, 8, 30, 0);
    let expected = clock.status("Asia/Jerusalem", Some(reference)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let clock = clock.clone();
            std::thread::spawn(move || clock.status("Asia/Jerusalem", Some(reference)).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
