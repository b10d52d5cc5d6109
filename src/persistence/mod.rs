//! High score durability behind a key/value store
//!
//! Features:
//! - `PersistentStore` trait: string get/set, the only surface the game needs
//! - In-memory store (tests, headless runs)
//! - JSON file store (native) and LocalStorage store (web)
//! - `HighScoreStore`: versioned JSON record with non-fatal failure handling

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Storage backend failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed stored value: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Minimal key/value persistence
pub trait PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored high score record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub version: u32,
    pub score: u64,
}

impl HighScoreRecord {
    pub const VERSION: u32 = 1;

    pub fn new(score: u64) -> Self {
        Self {
            version: Self::VERSION,
            score,
        }
    }
}

/// High score load/save over any [`PersistentStore`].
///
/// Failures never reach the simulation: reads fall back to 0, writes are
/// skipped. Both are logged.
pub struct HighScoreStore {
    store: Box<dyn PersistentStore>,
}

impl HighScoreStore {
    pub const KEY: &'static str = "hop_arcade_high_score";

    pub fn new(store: Box<dyn PersistentStore>) -> Self {
        Self { store }
    }

    /// Volatile store, for tests and headless runs
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Read the stored high score (0 if absent or unreadable)
    pub fn load(&self) -> u64 {
        match self.try_load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to load high score, using 0: {}", e);
                0
            }
        }
    }

    fn try_load(&self) -> Result<Option<u64>, StoreError> {
        let Some(raw) = self.store.get(Self::KEY)? else {
            return Ok(None);
        };
        // Older saves stored the bare number
        if let Ok(score) = raw.trim().parse::<u64>() {
            return Ok(Some(score));
        }
        let record: HighScoreRecord = serde_json::from_str(&raw)?;
        Ok(Some(record.score))
    }

    /// Write the high score through. Returns whether the write succeeded.
    pub fn save(&mut self, score: u64) -> bool {
        let result = serde_json::to_string(&HighScoreRecord::new(score))
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(Self::KEY, &json));
        match result {
            Ok(()) => {
                log::debug!("High score {} saved", score);
                true
            }
            Err(e) => {
                log::warn!("Failed to save high score {}: {}", score, e);
                false
            }
        }
    }
}

impl std::fmt::Debug for HighScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreStore").finish_non_exhaustive()
    }
}
