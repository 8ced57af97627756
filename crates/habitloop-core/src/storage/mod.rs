mod config;
pub mod database;

pub use config::{Config, TaskDef};
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `HABITLOOP_DATA_DIR` wins when set. Otherwise `~/.config/habitloop[-dev]/`
/// based on HABITLOOP_ENV; set HABITLOOP_ENV=dev to use the development
/// directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HABITLOOP_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitloop-dev")
            } else {
                base_dir.join("habitloop")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Key-value blob transport the store persists its document through.
///
/// Values are whole blobs; a `set` replaces the previous value entirely.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Process-local blob store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one blob.
    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.to_string(), value.to_string());
        Self { blobs }
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.blobs.remove(key);
        Ok(())
    }
}
