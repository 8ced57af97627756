use habitloop_core::Stats;
use serde::Serialize;

use super::{open_store, CliResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    #[serde(flatten)]
    stats: Stats,
    cycle_progress_pct: f64,
}

pub fn run() -> CliResult {
    let store = open_store()?;
    let stats = store.stats();
    let view = StatsView {
        cycle_progress_pct: stats.cycle_progress_pct(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Print level-up suggestions; errors while the reward is locked.
pub fn reward() -> CliResult {
    let store = open_store()?;
    println!("{}", serde_json::to_string_pretty(&store.reward()?)?);
    Ok(())
}

pub fn history() -> CliResult {
    let store = open_store()?;
    println!("{}", serde_json::to_string_pretty(&store.history_strip())?);
    Ok(())
}
