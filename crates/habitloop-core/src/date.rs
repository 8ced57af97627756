//! Calendar-day helpers.
//!
//! Days are `chrono::NaiveDate` in the local timezone. Their `Ord` matches the
//! lexicographic order of the `YYYY-MM-DD` keys they serialize to.

use std::cell::Cell;

use chrono::{Days, Local, NaiveDate};

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a settable day.
#[derive(Debug, Clone)]
pub struct FixedClock {
    day: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day: Cell::new(day) }
    }

    pub fn set(&self, day: NaiveDate) {
        self.day.set(day);
    }

    /// Move the clock forward by `n` days.
    pub fn advance(&self, n: u64) {
        self.day.set(days_forward(self.day.get(), n));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.day.get()
    }
}

/// `date` minus `n` days, saturating at the earliest representable date.
pub fn days_back(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// `date` plus `n` days, saturating at the latest representable date.
pub fn days_forward(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// `YYYY-MM-DD` key of a day.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
