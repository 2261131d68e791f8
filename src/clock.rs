//! Injectable source of the current instant.
//!
//! Relative labels ("Previous", "Upcoming", weekday names) depend on "today",
//! so everything that computes them takes a [`Clock`] instead of reading the
//! system time directly.

use chrono::{DateTime, NaiveDate, Utc};

/// A source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock frozen at UTC midnight of the given date.
    ///
    /// Returns `None` for dates that do not exist (e.g. February 30th).
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Self(dt.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Current month as `YYYY-MM`, the format the transaction summary expects.
pub fn current_month(clock: &dyn Clock) -> String {
    clock.now().format("%Y-%m").to_string()
}
