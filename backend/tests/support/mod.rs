use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

const PREFIX: &str = "SABBATH_";

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive hold on the `SABBATH_*` environment for one test.
///
/// Creating the guard takes the process-wide lock and unsets every
/// `SABBATH_*` variable; dropping it puts back whatever was there before,
/// including on panic.
#[allow(dead_code)]
pub struct SabbathEnv {
    saved: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

#[allow(dead_code)]
impl SabbathEnv {
    pub fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let present: Vec<OsString> = env::vars_os()
            .map(|(key, _)| key)
            .filter(|key| key.to_string_lossy().starts_with(PREFIX))
            .collect();

        let mut guard = Self {
            saved: Vec::new(),
            _lock: lock,
        };
        for key in present {
            guard.save(&key);
            env::remove_var(&key);
        }
        guard
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.save(key.as_ref());
        env::set_var(key, value);
        self
    }

    fn save(&mut self, key: &std::ffi::OsStr) {
        if self.saved.iter().all(|(saved, _)| saved != key) {
            self.saved.push((key.to_owned(), env::var_os(key)));
        }
    }
}

impl Drop for SabbathEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// A wall-clock instant in October 2026 (2026-10-14 is a Wednesday).
#[allow(dead_code)]
pub fn october(tz: Tz, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Tz> {
    tz.with_ymd_and_hms(2026, 10, day, hour, minute, second)
        .single()
        .expect("unambiguous local time")
}
