//! Fixed-length strip of recent days for the history grid.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::days_back;
use crate::model::{DayGrade, Document};
use crate::storage::Config;

/// One square of the history grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// Stored level, 0 when the day has no record
    pub level: u32,
    pub grade: DayGrade,
    pub recorded: bool,
}

/// The last `config.history_days` days ending at `today`, oldest first.
pub fn history_strip(doc: &Document, config: &Config, today: NaiveDate) -> Vec<HistoryCell> {
    (0..u64::from(config.history_days))
        .rev()
        .map(|offset| {
            let date = days_back(today, offset);
            let record = doc.day(date);
            let level = record.map_or(0, |d| d.level);
            HistoryCell {
                date,
                day_of_month: date.day(),
                level,
                grade: config.grade(level),
                recorded: record.is_some(),
            }
        })
        .collect()
}
