//! Tick clock - the single wall-clock view the reading pipeline consumes.
//!
//! All time dependence (hour-of-day, weekday, month, seconds since midnight)
//! flows through this type so tests can pin a moment in time.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Snapshot of local time taken once per reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    now: NaiveDateTime,
}

impl TickClock {
    /// Capture the current local time.
    pub fn current() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    /// Pin an exact moment (tests and replay).
    pub fn fixed(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let now = date
            .and_hms_opt(hour, minute, second)
            .unwrap_or_else(|| date.and_hms_opt(12, 0, 0).unwrap());
        Self { now }
    }

    pub fn from_naive(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.now
    }

    /// Hour of day, 0..=23.
    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    /// Month, 1..=12.
    pub fn month(&self) -> u32 {
        self.now.month()
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.now.weekday().num_days_from_monday() >= 5
    }

    /// Seconds elapsed since local midnight.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.now.num_seconds_from_midnight()
    }

    /// Whole hours between `earlier` and this tick (negative clamps to zero).
    pub fn hours_since(&self, earlier: NaiveDateTime) -> f64 {
        let seconds = (self.now - earlier).num_seconds();
        (seconds.max(0) as f64) / 3600.0
    }

    /// ISO-8601 timestamp for emitted readings.
    pub fn iso8601(&self) -> String {
        self.now.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    }

    /// Calendar date, `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }
}
