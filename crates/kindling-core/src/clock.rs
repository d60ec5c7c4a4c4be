//! Calendar-day utilities for the cycle.
//!
//! Everything here works on whole calendar days (`NaiveDate`); time of day
//! never participates in streak or cycle decisions.

use chrono::{Duration, Local, NaiveDate};

/// Length of one content/challenge cycle in days.
pub const CYCLE_LENGTH_DAYS: i64 = 3;

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Absolute difference between two calendar days.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u32 {
    let diff = (b - a).num_days().unsigned_abs();
    u32::try_from(diff).unwrap_or(u32::MAX)
}

/// `date` shifted by `n` days (negative `n` moves backwards).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// A cycle is due when nothing is scheduled yet or the unlock day has arrived.
pub fn is_cycle_due(next_available: Option<NaiveDate>, today: NaiveDate) -> bool {
    match next_available {
        None => true,
        Some(next) => today >= next,
    }
}

/// Source of "today" for the orchestrator.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        today()
    }
}

/// Always reports the same day. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self(day)
    }

    /// Move the clock forward (or back) by `n` days.
    pub fn advance(&mut self, n: i64) {
        self.0 = add_days(self.0, n);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
