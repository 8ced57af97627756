//! TOML-based tracker configuration.
//!
//! Describes the fixed daily task list and the thresholds the store derives
//! levels and statistics from:
//! - Task ids and labels
//! - Passing / perfect thresholds
//! - Cycle length and reward goal
//! - Storage key of the persisted document
//!
//! Configuration is stored at `~/.config/habitloop/config.toml`. It is read
//! once per process and never written through by the store.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::model::DayGrade;

/// One daily task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
    pub id: u32,
    pub label: String,
    /// Harder variant suggested once the cycle reward unlocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_up: Option<String>,
}

impl TaskDef {
    fn new(id: u32, label: &str, level_up: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            level_up: Some(level_up.to_string()),
        }
    }
}

/// Tracker configuration.
///
/// Serialized to/from TOML at `~/.config/habitloop/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Length of a tracking cycle in days; also caps the streak walk.
    #[serde(default = "default_cycle_days")]
    pub cycle_days: u32,
    /// Completed tasks needed for a day to pass.
    #[serde(default = "default_passing_target")]
    pub passing_target: u32,
    /// Completed tasks for a perfect day.
    #[serde(default = "default_perfect_target")]
    pub perfect_target: u32,
    /// Passed days within a cycle that unlock the reward.
    #[serde(default = "default_reward_cycle_goal")]
    pub reward_cycle_goal: u32,
    /// Window (and denominator) of the pass rate.
    #[serde(default = "default_rate_window_days")]
    pub rate_window_days: u32,
    /// Days shown in the history strip.
    #[serde(default = "default_history_days")]
    pub history_days: u32,
    /// Key of the document in the blob store.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskDef>,
}

fn default_cycle_days() -> u32 {
    60
}
fn default_passing_target() -> u32 {
    2
}
fn default_perfect_target() -> u32 {
    4
}
fn default_reward_cycle_goal() -> u32 {
    45
}
fn default_rate_window_days() -> u32 {
    30
}
fn default_history_days() -> u32 {
    28
}
fn default_storage_key() -> String {
    "habit_app_v1".into()
}
fn default_tasks() -> Vec<TaskDef> {
    vec![
        TaskDef::new(0, "Go outside", "Walk outside for 10 minutes"),
        TaskDef::new(1, "Listen to one English passage", "Listen, then read one sentence aloud"),
        TaskDef::new(2, "Memorize 10 new English words", "Memorize 15 new words"),
        TaskDef::new(
            3,
            "Read one page of an industrial engineering book",
            "Read two pages",
        ),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle_days: default_cycle_days(),
            passing_target: default_passing_target(),
            perfect_target: default_perfect_target(),
            reward_cycle_goal: default_reward_cycle_goal(),
            rate_window_days: default_rate_window_days(),
            history_days: default_history_days(),
            storage_key: default_storage_key(),
            tasks: default_tasks(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    /// Default location, `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Config>(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "writing default config");
                let cfg = Self::default();
                cfg.save_to(path)?;
                cfg
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check the task list and thresholds are coherent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if self.tasks.is_empty() {
            return Err(invalid("tasks", "at least one task is required".into()));
        }
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(invalid("tasks", format!("duplicate task id {}", task.id)));
            }
        }
        // ids are dense from 0
        if let Some(missing) = (0..self.tasks.len() as u32).find(|id| !seen.contains(id)) {
            return Err(invalid(
                "tasks",
                format!("task ids must be 0..{}; id {missing} is missing", self.tasks.len()),
            ));
        }
        if self.perfect_target as usize != self.tasks.len() {
            return Err(invalid(
                "perfect_target",
                format!(
                    "{} must equal the task count {}",
                    self.perfect_target,
                    self.tasks.len()
                ),
            ));
        }
        if self.passing_target > self.perfect_target {
            return Err(invalid(
                "passing_target",
                format!("{} exceeds perfect_target {}", self.passing_target, self.perfect_target),
            ));
        }
        if self.cycle_days == 0 {
            return Err(invalid("cycle_days", "must be positive".into()));
        }
        if self.rate_window_days == 0 {
            return Err(invalid("rate_window_days", "must be positive".into()));
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn task(&self, id: u32) -> Option<&TaskDef> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Whether a day at `level` counts as passed.
    pub fn passes(&self, level: u32) -> bool {
        level >= self.passing_target
    }

    pub fn grade(&self, level: u32) -> DayGrade {
        if level >= self.perfect_target {
            DayGrade::Perfect
        } else if level > self.passing_target {
            DayGrade::Great
        } else if level == self.passing_target {
            DayGrade::Passed
        } else {
            DayGrade::Pending
        }
    }
}
