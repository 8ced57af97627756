//! Core error types for habitloop-core.
//!
//! This module defines the error hierarchy using thiserror. Storage,
//! configuration and import failures each get their own enum and fold into
//! [`CoreError`] through `From` conversions.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for habitloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence transport errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backup import rejected
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// The persisted document could not be decoded
    #[error("Stored document under '{key}' is corrupt: {source}")]
    CorruptDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Mutation addressed a task id the config does not define
    #[error("Unknown task id {task_id} (known ids: 0..{task_count})")]
    UnknownTask { task_id: u32, task_count: usize },

    /// No record exists for the day being mutated
    #[error("No record for {date}; the new-day check has not run")]
    MissingDay { date: NaiveDate },

    /// Timer already running for this task
    #[error("Timer for task {task_id} is already running")]
    TimerRunning { task_id: u32 },

    /// No running timer for this task
    #[error("No timer running for task {task_id}")]
    TimerNotRunning { task_id: u32 },

    /// Reward requested before the cycle goal is reached
    #[error("Reward locked: {passed}/{goal} passing days")]
    RewardLocked { passed: u32, goal: u32 },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence transport errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Reasons a backup document is rejected.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input is not JSON or does not match the document shape
    #[error("not a valid habit document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Top level is JSON but not an object
    #[error("expected a JSON object at the top level")]
    NotAnObject,

    /// Required top-level field is absent
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
