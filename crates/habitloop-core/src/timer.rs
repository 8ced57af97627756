//! Running per-task timers.
//!
//! A timer only remembers when it was started. Stopping it yields the whole
//! minutes elapsed, which the store adds to the task's logged time.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Timers currently running, keyed by task id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerBook {
    #[serde(default)]
    pub running: BTreeMap<u32, DateTime<Utc>>,
}

impl TimerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, task_id: u32) -> bool {
        self.running.contains_key(&task_id)
    }

    pub fn start(&mut self, task_id: u32, now: DateTime<Utc>) -> Result<()> {
        if self.is_running(task_id) {
            return Err(CoreError::TimerRunning { task_id });
        }
        self.running.insert(task_id, now);
        Ok(())
    }

    /// Stop the timer and return the whole minutes it ran.
    pub fn stop(&mut self, task_id: u32, now: DateTime<Utc>) -> Result<u32> {
        let started = self
            .running
            .remove(&task_id)
            .ok_or(CoreError::TimerNotRunning { task_id })?;
        Ok(whole_minutes(started, now))
    }

    /// Whole minutes a running timer has accumulated so far.
    pub fn elapsed(&self, task_id: u32, now: DateTime<Utc>) -> Option<u32> {
        self.running
            .get(&task_id)
            .map(|started| whole_minutes(*started, now))
    }
}

fn whole_minutes(started: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    (now - started).num_minutes().clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, hour, min, sec).unwrap()
    }

    #[test]
    fn stop_returns_whole_minutes() {
        let mut book = TimerBook::new();
        book.start(1, at(9, 0, 0)).unwrap();
        assert!(book.is_running(1));
        assert_eq!(book.elapsed(1, at(9, 12, 59)), Some(12));
        assert_eq!(book.stop(1, at(9, 25, 30)).unwrap(), 25);
        assert!(!book.is_running(1));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut book = TimerBook::new();
        book.start(0, at(9, 0, 0)).unwrap();
        let err = book.start(0, at(9, 5, 0)).unwrap_err();
        assert!(matches!(err, CoreError::TimerRunning { task_id: 0 }));
    }

    #[test]
    fn stop_without_start_is_rejected() {
        let mut book = TimerBook::new();
        let err = book.stop(2, at(9, 0, 0)).unwrap_err();
        assert!(matches!(err, CoreError::TimerNotRunning { task_id: 2 }));
    }

    #[test]
    fn clock_going_backwards_counts_zero() {
        let mut book = TimerBook::new();
        let start = at(9, 0, 0);
        book.start(3, start).unwrap();
        assert_eq!(book.stop(3, start - Duration::minutes(5)).unwrap(), 0);
    }

    #[test]
    fn book_roundtrips_through_json() {
        let mut book = TimerBook::new();
        book.start(2, at(8, 30, 0)).unwrap();
        let json = serde_json::to_string(&book).unwrap();
        let parsed: TimerBook = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, book);
    }
}
