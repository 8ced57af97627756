//! Cycle reward: harder task variants offered once enough days passed.

use serde::{Deserialize, Serialize};

use super::Stats;
use crate::error::{CoreError, Result};
use crate::storage::Config;

/// Suggested harder variant of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUp {
    pub task_id: u32,
    pub label: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardPlan {
    pub pass_count_cycle: u32,
    pub pass_target: u32,
    /// Tasks without a configured `level_up` are left out
    pub level_ups: Vec<LevelUp>,
}

/// The level-up suggestions, available once the cycle goal is reached.
///
/// # Errors
/// `RewardLocked` while `stats.pass_count_cycle < stats.pass_target`.
pub fn reward_plan(stats: &Stats, config: &Config) -> Result<RewardPlan> {
    if !stats.reward_unlocked {
        return Err(CoreError::RewardLocked {
            passed: stats.pass_count_cycle,
            goal: stats.pass_target,
        });
    }

    let level_ups = config
        .tasks
        .iter()
        .filter_map(|def| {
            def.level_up.as_ref().map(|suggestion| LevelUp {
                task_id: def.id,
                label: def.label.clone(),
                suggestion: suggestion.clone(),
            })
        })
        .collect();

    Ok(RewardPlan {
        pass_count_cycle: stats.pass_count_cycle,
        pass_target: stats.pass_target,
        level_ups,
    })
}
