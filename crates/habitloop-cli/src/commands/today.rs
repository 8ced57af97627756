use chrono::NaiveDate;
use habitloop_core::{BlobStore, Clock, DayGrade, HabitStore};
use serde::Serialize;

use super::{open_store, CliResult};

#[derive(Serialize)]
pub struct TaskView {
    pub id: u32,
    pub label: String,
    pub done: bool,
    pub time: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayView {
    pub date: NaiveDate,
    pub level: u32,
    pub grade: DayGrade,
    pub total_minutes: u64,
    pub comment: String,
    pub tasks: Vec<TaskView>,
}

impl TodayView {
    /// Today's record joined with the configured labels.
    pub fn build<S: BlobStore, C: Clock>(
        store: &HabitStore<S, C>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let record = store
            .today_data()
            .ok_or_else(|| format!("no record for {}", store.today()))?;
        let tasks = store
            .config()
            .tasks
            .iter()
            .map(|def| {
                let entry = record.tasks.get(&def.id).copied().unwrap_or_default();
                TaskView {
                    id: def.id,
                    label: def.label.clone(),
                    done: entry.done,
                    time: entry.time,
                }
            })
            .collect();

        Ok(Self {
            date: store.today(),
            level: record.level,
            grade: store.config().grade(record.level),
            total_minutes: record.total_minutes(),
            comment: record.comment.clone(),
            tasks,
        })
    }
}

pub fn print_today<S: BlobStore, C: Clock>(store: &HabitStore<S, C>) -> CliResult {
    let view = TodayView::build(store)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub fn run() -> CliResult {
    let store = open_store()?;
    print_today(&store)
}

pub fn comment(text: &str) -> CliResult {
    let mut store = open_store()?;
    store.update_comment(text)?;
    print_today(&store)
}
