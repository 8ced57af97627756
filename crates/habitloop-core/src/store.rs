//! The habit store: owns the document, applies mutations, answers queries.
//!
//! Every mutation recomputes the affected day and writes the whole document
//! back to the blob store under the configured key. Queries never write.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use crate::backup;
use crate::date::{Clock, SystemClock};
use crate::error::{CoreError, Result};
use crate::model::{DayRecord, Document, TaskPatch};
use crate::stats::{history_strip, reward_plan, HistoryCell, RewardPlan, Stats};
use crate::storage::{BlobStore, Config};
use crate::timer::TimerBook;

/// Daily habit state bound to one blob store.
pub struct HabitStore<S, C = SystemClock> {
    config: Config,
    backend: S,
    clock: C,
    doc: Document,
}

impl<S: BlobStore> HabitStore<S, SystemClock> {
    /// Load (or create) the document using the local wall clock.
    pub fn open(config: Config, backend: S) -> Result<Self> {
        Self::open_with_clock(config, backend, SystemClock)
    }
}

impl<S: BlobStore, C: Clock> HabitStore<S, C> {
    /// Load the stored document, or start a new one when none exists, then
    /// run the new-day check.
    ///
    /// # Errors
    /// Fails when the blob store cannot be read or written, or when the
    /// stored document does not decode. A corrupt blob is left in place.
    pub fn open_with_clock(config: Config, backend: S, clock: C) -> Result<Self> {
        let today = clock.today();
        let doc = match backend.get(&config.storage_key)? {
            Some(blob) => serde_json::from_str::<Document>(&blob).map_err(|source| {
                CoreError::CorruptDocument {
                    key: config.storage_key.clone(),
                    source,
                }
            })?,
            None => {
                info!(%today, "no stored document, starting a new one");
                Document::new(today)
            }
        };

        let mut store = Self {
            config,
            backend,
            clock,
            doc,
        };
        store.check_new_day()?;
        Ok(store)
    }

    /// Create today's record if it is missing. Returns whether one was created.
    pub fn check_new_day(&mut self) -> Result<bool> {
        let today = self.today();
        if self.doc.history.contains_key(&today) {
            return Ok(false);
        }

        info!(%today, "new day");
        self.doc.history.insert(today, DayRecord::new(&self.config));
        self.doc.last_visit = today;
        self.persist()?;
        Ok(true)
    }

    /// Merge `patch` onto today's entry for `task_id` and refresh the level.
    ///
    /// # Errors
    /// `UnknownTask` when the id is not configured; `MissingDay` when today's
    /// record does not exist. Nothing is written in either case.
    pub fn update_task(&mut self, task_id: u32, patch: TaskPatch) -> Result<()> {
        self.ensure_task(task_id)?;
        let today = self.today();
        let record = self
            .doc
            .history
            .get_mut(&today)
            .ok_or(CoreError::MissingDay { date: today })?;

        patch.apply(record.tasks.entry(task_id).or_default());
        self.calculate_level(today);
        debug!(task_id, ?patch, level = self.doc.level_on(today), "task updated");
        self.persist()
    }

    /// Flip today's done flag for `task_id`; returns the new value.
    pub fn toggle_task(&mut self, task_id: u32) -> Result<bool> {
        self.ensure_task(task_id)?;
        let done = self
            .today_data()
            .and_then(|d| d.tasks.get(&task_id))
            .is_some_and(|t| t.done);
        self.update_task(task_id, TaskPatch::done(!done))?;
        Ok(!done)
    }

    /// Replace today's comment verbatim.
    pub fn update_comment(&mut self, text: &str) -> Result<()> {
        let today = self.today();
        let record = self
            .doc
            .history
            .get_mut(&today)
            .ok_or(CoreError::MissingDay { date: today })?;
        record.comment = text.to_string();
        self.persist()
    }

    fn calculate_level(&mut self, date: NaiveDate) {
        if let Some(record) = self.doc.history.get_mut(&date) {
            record.recompute_level();
        }
    }

    fn ensure_task(&self, task_id: u32) -> Result<()> {
        if self.config.task(task_id).is_none() {
            return Err(CoreError::UnknownTask {
                task_id,
                task_count: self.config.task_count(),
            });
        }
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Today's record. Never creates one.
    pub fn today_data(&self) -> Option<&DayRecord> {
        self.doc.day(self.today())
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.doc, &self.config, self.today())
    }

    pub fn history_strip(&self) -> Vec<HistoryCell> {
        history_strip(&self.doc, &self.config, self.today())
    }

    /// Level-up suggestions; fails with `RewardLocked` until the cycle goal.
    pub fn reward(&self) -> Result<RewardPlan> {
        reward_plan(&self.stats(), &self.config)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// The document in backup form.
    pub fn export_state(&self) -> Result<String> {
        backup::export_document(&self.doc)
    }

    /// Replace the whole document with a backup.
    ///
    /// The new document is written before it is adopted, so a rejected
    /// backup or a failed write leaves both memory and storage as they were.
    /// The new-day check is not re-run; reopen the store afterwards.
    pub fn import_state(&mut self, serialized: &str) -> Result<()> {
        let doc = backup::parse_document(serialized)?;
        let blob = serde_json::to_string(&doc)?;
        self.backend.set(&self.config.storage_key, &blob)?;
        info!(days = doc.history.len(), start = %doc.start_date, "document imported");
        self.doc = doc;
        Ok(())
    }

    fn timer_key(&self) -> String {
        format!("{}_timers", self.config.storage_key)
    }

    /// Timers currently running.
    pub fn timers(&self) -> Result<TimerBook> {
        match self.backend.get(&self.timer_key())? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(TimerBook::new()),
        }
    }

    fn save_timers(&mut self, book: &TimerBook) -> Result<()> {
        let key = self.timer_key();
        if book.running.is_empty() {
            self.backend.remove(&key)?;
        } else {
            self.backend.set(&key, &serde_json::to_string(book)?)?;
        }
        Ok(())
    }

    pub fn start_timer(&mut self, task_id: u32, now: DateTime<Utc>) -> Result<()> {
        self.ensure_task(task_id)?;
        let mut book = self.timers()?;
        book.start(task_id, now)?;
        self.save_timers(&book)?;
        debug!(task_id, %now, "timer started");
        Ok(())
    }

    /// Stop a timer and add its whole minutes to today's time for the task.
    /// Returns the minutes added.
    pub fn stop_timer(&mut self, task_id: u32, now: DateTime<Utc>) -> Result<u32> {
        self.ensure_task(task_id)?;
        let mut book = self.timers()?;
        let minutes = book.stop(task_id, now)?;

        let logged = self
            .today_data()
            .and_then(|d| d.tasks.get(&task_id))
            .map_or(0, |t| t.time);
        self.update_task(task_id, TaskPatch::time(i64::from(logged) + i64::from(minutes)))?;
        self.save_timers(&book)?;
        debug!(task_id, minutes, "timer stopped");
        Ok(minutes)
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.doc)?;
        self.backend.set(&self.config.storage_key, &blob)?;
        Ok(())
    }
}
