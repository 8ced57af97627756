//! Task commands for CLI.

use clap::Subcommand;
use habitloop_core::TaskPatch;

use super::today::print_today;
use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List configured tasks
    List,
    /// Mark a task done for today
    Done {
        /// Task ID
        id: u32,
    },
    /// Mark a task not done for today
    Undo {
        /// Task ID
        id: u32,
    },
    /// Flip a task's done state for today
    Toggle {
        /// Task ID
        id: u32,
    },
    /// Set minutes spent on a task today
    Time {
        /// Task ID
        id: u32,
        /// Minutes; non-numeric or negative values store 0
        #[arg(allow_hyphen_values = true)]
        minutes: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&store.config().tasks)?);
            return Ok(());
        }
        TaskAction::Done { id } => store.update_task(id, TaskPatch::done(true))?,
        TaskAction::Undo { id } => store.update_task(id, TaskPatch::done(false))?,
        TaskAction::Toggle { id } => {
            store.toggle_task(id)?;
        }
        TaskAction::Time { id, minutes } => {
            store.update_task(id, TaskPatch::time_input(&minutes))?
        }
    }

    print_today(&store)
}
