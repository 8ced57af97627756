use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use serde_json::json;

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start timing a task
    Start {
        /// Task ID
        id: u32,
    },
    /// Stop timing a task and add the minutes to today's time
    Stop {
        /// Task ID
        id: u32,
    },
    /// Print running timers as JSON
    Status,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunningTimer {
    id: u32,
    elapsed_min: u32,
}

pub fn run(action: TimerAction) -> CliResult {
    let mut store = open_store()?;
    let now = Utc::now();

    match action {
        TimerAction::Start { id } => {
            store.start_timer(id, now)?;
            println!("{}", json!({ "type": "timer_started", "id": id }));
        }
        TimerAction::Stop { id } => {
            let minutes = store.stop_timer(id, now)?;
            println!(
                "{}",
                json!({ "type": "timer_stopped", "id": id, "addedMin": minutes })
            );
        }
        TimerAction::Status => {
            let book = store.timers()?;
            let running: Vec<RunningTimer> = book
                .running
                .keys()
                .map(|id| RunningTimer {
                    id: *id,
                    elapsed_min: book.elapsed(*id, now).unwrap_or(0),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&running)?);
        }
    }
    Ok(())
}
