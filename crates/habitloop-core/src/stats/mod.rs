//! Statistics module for habitloop
//!
//! Everything here is recomputed from the document on each call; nothing is
//! cached between queries. Absent days are handled differently per figure:
//! the pass rate simply does not count them, while the streak stops at them.

mod history;
mod reward;

pub use history::{history_strip, HistoryCell};
pub use reward::{reward_plan, LevelUp, RewardPlan};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::days_back;
use crate::model::Document;
use crate::storage::Config;

/// Derived figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Minutes logged across today's tasks
    pub today_time: u64,
    /// Consecutive passing days ending today (or yesterday while today is open)
    pub streak: u32,
    /// Percentage of passing days in the rate window
    pub rate30: u32,
    /// Passing days since the document's start date
    pub pass_count_cycle: u32,
    /// Passing days that unlock the reward
    pub pass_target: u32,
    /// Today's level, 0 without a record
    pub today_level: u32,
    /// `pass_count_cycle >= pass_target`
    pub reward_unlocked: bool,
    /// Every task done today
    pub perfect_today: bool,
}

impl Stats {
    pub fn compute(doc: &Document, config: &Config, today: NaiveDate) -> Self {
        let today_record = doc.day(today);
        let pass_count_cycle = pass_count_since_start(doc, config);
        let pass_target = config.reward_cycle_goal;
        let today_level = today_record.map_or(0, |d| d.level);

        Self {
            today_time: today_record.map_or(0, |d| d.total_minutes()),
            streak: streak(doc, config, today),
            rate30: pass_rate(doc, config, today),
            pass_count_cycle,
            pass_target,
            today_level,
            reward_unlocked: pass_count_cycle >= pass_target,
            perfect_today: today_level >= config.perfect_target,
        }
    }

    /// Cycle progress toward the reward, capped at 100.
    pub fn cycle_progress_pct(&self) -> f64 {
        if self.pass_target == 0 {
            return 100.0;
        }
        (self.pass_count_cycle as f64 / self.pass_target as f64 * 100.0).min(100.0)
    }
}

/// Consecutive passing days walking back from `today`, at most `cycle_days`.
///
/// An unfinished today is skipped rather than breaking the run; any earlier
/// day that is missing or below the threshold ends it.
pub fn streak(doc: &Document, config: &Config, today: NaiveDate) -> u32 {
    let mut run = 0;
    for offset in 0..u64::from(config.cycle_days) {
        let date = days_back(today, offset);
        let passed = doc.day(date).is_some_and(|d| config.passes(d.level));

        if passed {
            run += 1;
        } else if offset > 0 {
            break;
        }
    }
    run
}

/// Passing days with keys in `[today - window, today]`.
pub fn pass_count_in_window(doc: &Document, config: &Config, today: NaiveDate) -> u32 {
    let cutoff = days_back(today, u64::from(config.rate_window_days));
    if cutoff > today {
        return 0;
    }
    doc.history
        .range(cutoff..=today)
        .filter(|(_, d)| config.passes(d.level))
        .count() as u32
}

/// `round(100 * passing / window)`. The window spans `window + 1` keys, so a
/// perfect run across all of them reads slightly above 100.
pub fn pass_rate(doc: &Document, config: &Config, today: NaiveDate) -> u32 {
    let count = pass_count_in_window(doc, config, today);
    (count as f64 / config.rate_window_days as f64 * 100.0).round() as u32
}

/// Passing days on or after the start date. Not reset when a cycle ends.
pub fn pass_count_since_start(doc: &Document, config: &Config) -> u32 {
    doc.history
        .range(doc.start_date..)
        .filter(|(_, d)| config.passes(d.level))
        .count() as u32
}
