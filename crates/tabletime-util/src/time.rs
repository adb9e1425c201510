//! Time utilities for tabletime
//!
//! Billing depends on exactly one external input: the current wall-clock
//! time. Everything that needs "now" receives it through the [`Clock`]
//! trait so tests and demos can drive time by hand.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `TABLETIME_MOCK_TIME` environment variable can be set
//! to shift the system clock used by [`SystemClock`]. The mock time advances
//! at the same rate as real time from the moment the process starts.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! TABLETIME_MOCK_TIME="2025-12-25 14:30:00" tabletime
//! ```

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "TABLETIME_MOCK_TIME";

/// Format accepted by `TABLETIME_MOCK_TIME`
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            let mock_time_str = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
            let offset = parse_mock_time(&mock_time_str)
                .map(|mock_dt| mock_dt.signed_duration_since(Local::now()));

            match offset {
                Some(offset) => tracing::info!(
                    mock_time = %mock_time_str,
                    offset_secs = offset.num_seconds(),
                    "Mock time enabled"
                ),
                None => tracing::warn!(
                    mock_time = %mock_time_str,
                    expected_format = MOCK_TIME_FORMAT,
                    "Invalid mock time, using system time"
                ),
            }
            offset
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Parse a mock time string in the local timezone.
pub fn parse_mock_time(value: &str) -> Option<DateTime<Local>> {
    let naive_dt = NaiveDateTime::parse_from_str(value, MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive_dt).single()
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
pub fn now() -> DateTime<Local> {
    let real_now = Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// Source of the current wall-clock time
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Local>;
}

/// Production clock backed by [`now()`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        now()
    }
}

/// Clock that only moves when told to.
///
/// Shared behind an `Arc` between the code under test and the test itself.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Start at the current system time
    pub fn starting_now() -> Self {
        Self::new(Local::now())
    }

    pub fn set(&self, to: DateTime<Local>) {
        *self.lock() = to;
    }

    /// Move the clock forward. Spans too large to represent leave it unchanged.
    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        if let Some(next) = chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
        {
            *now = next;
        }
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Local>> {
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.lock()
    }
}

/// Whole minutes elapsed between `start` and `end`, truncating.
///
/// 59 seconds bill as 0 minutes, 60..=119 seconds as 1. A negative span
/// (the clock moved backward) bills as 0.
pub fn billable_minutes(start: DateTime<Local>, end: DateTime<Local>) -> u64 {
    u64::try_from(end.signed_duration_since(start).num_minutes()).unwrap_or(0)
}

/// Format a DateTime as a short clock time, e.g. `14:30`.
pub fn format_clock_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}
