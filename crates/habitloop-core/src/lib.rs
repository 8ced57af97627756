//! # habitloop Core Library
//!
//! This library provides the state and statistics engine for habitloop, a
//! personal tracker for a small fixed set of daily tasks. The CLI binary is a
//! thin display layer over the same library.
//!
//! ## Architecture
//!
//! - **Store**: owns the persisted document, applies task/comment mutations
//!   and writes the whole document back after each one
//! - **Storage**: blob-store transport (SQLite kv table or in-memory) and the
//!   TOML configuration
//! - **Stats**: streak, pass rate, cycle progress and the history strip,
//!   recomputed from history on every query
//!
//! ## Key Components
//!
//! - [`HabitStore`]: mutations and queries over the document
//! - [`Config`]: task list and thresholds, read-only once loaded
//! - [`Database`]: SQLite-backed [`BlobStore`]
//! - [`Stats`]: dashboard figures
//! - [`RewardPlan`]: level-up suggestions once the cycle goal is met

pub mod backup;
pub mod date;
pub mod error;
pub mod model;
pub mod stats;
pub mod storage;
pub mod store;
pub mod timer;

pub use date::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, ImportError, StorageError};
pub use model::{DayGrade, DayRecord, Document, TaskEntry, TaskPatch};
pub use stats::{HistoryCell, LevelUp, RewardPlan, Stats};
pub use storage::{BlobStore, Config, Database, MemoryStore, TaskDef};
pub use store::HabitStore;
pub use timer::TimerBook;
