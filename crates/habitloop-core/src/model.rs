//! Persisted document types.
//!
//! The JSON shape is shared by live storage and backups:
//!
//! ```json
//! {
//!   "startDate": "2026-10-01",
//!   "lastVisit": "2026-10-18",
//!   "history": {
//!     "2026-10-18": {
//!       "tasks": { "0": { "done": true, "time": 15 } },
//!       "comment": "",
//!       "level": 1
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::storage::Config;

/// State of one task on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskEntry {
    #[serde(default)]
    pub done: bool,
    /// Minutes spent.
    #[serde(default, deserialize_with = "deserialize_minutes")]
    pub time: u32,
}

/// Partial update of a [`TaskEntry`]. Absent fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_patch_minutes"
    )]
    pub time: Option<i64>,
}

impl TaskPatch {
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            time: None,
        }
    }

    pub fn time(minutes: i64) -> Self {
        Self {
            done: None,
            time: Some(minutes),
        }
    }

    /// Minutes typed by a user; anything unparsable becomes 0.
    pub fn time_input(input: &str) -> Self {
        Self::time(parse_minutes(input))
    }

    /// Shallow merge onto `entry`, clamping time to `>= 0`.
    pub fn apply(&self, entry: &mut TaskEntry) {
        if let Some(done) = self.done {
            entry.done = done;
        }
        if let Some(time) = self.time {
            entry.time = clamp_minutes(time);
        }
    }
}

/// One calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayRecord {
    pub tasks: BTreeMap<u32, TaskEntry>,
    #[serde(default)]
    pub comment: String,
    /// Count of done tasks; a cache refreshed on every task write.
    #[serde(default)]
    pub level: u32,
}

impl DayRecord {
    /// Fresh record with every configured task undone and at zero minutes.
    pub fn new(config: &Config) -> Self {
        Self {
            tasks: config
                .tasks
                .iter()
                .map(|t| (t.id, TaskEntry::default()))
                .collect(),
            comment: String::new(),
            level: 0,
        }
    }

    /// Number of done tasks.
    pub fn completed_count(&self) -> u32 {
        self.tasks.values().filter(|t| t.done).count() as u32
    }

    /// Refresh the cached level from the task entries.
    pub fn recompute_level(&mut self) -> u32 {
        self.level = self.completed_count();
        self.level
    }

    pub fn total_minutes(&self) -> u64 {
        self.tasks.values().map(|t| u64::from(t.time)).sum()
    }
}

/// The whole persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Day the document was created; anchors cycle counting.
    pub start_date: NaiveDate,
    pub history: BTreeMap<NaiveDate, DayRecord>,
    /// Most recent day a record was created for.
    pub last_visit: NaiveDate,
}

impl Document {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            history: BTreeMap::new(),
            last_visit: today,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.history.get(&date)
    }

    /// Level stored for `date`, 0 when there is no record.
    pub fn level_on(&self, date: NaiveDate) -> u32 {
        self.day(date).map_or(0, |d| d.level)
    }
}

/// Display grade of a day's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayGrade {
    /// Below the passing threshold
    Pending,
    /// Exactly at the passing threshold
    Passed,
    /// Above passing, short of perfect
    Great,
    /// Every task done
    Perfect,
}

impl DayGrade {
    pub fn label(&self) -> &'static str {
        match self {
            DayGrade::Pending => "PENDING",
            DayGrade::Passed => "PASSED",
            DayGrade::Great => "GREAT",
            DayGrade::Perfect => "PERFECT",
        }
    }
}

/// Leading-integer parse of user input: `"12abc"` is 12, `"abc"` and
/// negatives are 0.
pub fn parse_minutes(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        0
    } else {
        value
    }
}

fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(0, i64::from(u32::MAX)) as u32
}

/// Coerce an arbitrary JSON value to minutes.
pub fn coerce_minutes(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_minutes(s),
        _ => 0,
    }
}

fn deserialize_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(clamp_minutes(coerce_minutes(&value)))
}

fn deserialize_patch_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(coerce_minutes(&value)))
}
