//! Tournament snapshot storage
//!
//! This module defines the interface for persisting and restoring the
//! tournament state, with in-memory and JSON file implementations.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info};

use crate::error::{Result, TournamentError};
use crate::tournament::TournamentState;

/// Trait for snapshot storage operations
pub trait TournamentStorage: Send + Sync {
    /// Load the latest snapshot, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<TournamentState>>;

    /// Replace the stored snapshot
    fn save(&self, state: &TournamentState) -> Result<()>;
}

/// In-memory snapshot storage
#[derive(Debug, Default)]
pub struct InMemoryTournamentStorage {
    state: RwLock<Option<TournamentState>>,
}

impl InMemoryTournamentStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStorage for InMemoryTournamentStorage {
    fn load(&self) -> Result<Option<TournamentState>> {
        let state = self
            .state
            .read()
            .map_err(|_| TournamentError::StorageError {
                message: "Failed to acquire state read lock".to_string(),
            })?;

        Ok(state.clone())
    }

    fn save(&self, snapshot: &TournamentState) -> Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| TournamentError::StorageError {
                message: "Failed to acquire state write lock".to_string(),
            })?;

        *state = Some(snapshot.clone());
        Ok(())
    }
}

/// Snapshot stored as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TournamentStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<TournamentState>> {
        if !self.path.exists() {
            debug!("No state file at {}", self.path.display());
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path).map_err(|e| TournamentError::StorageError {
            message: format!("Failed to read {}: {}", self.path.display(), e),
        })?;
        let state = serde_json::from_str(&raw).map_err(|e| TournamentError::StorageError {
            message: format!("Failed to parse {}: {}", self.path.display(), e),
        })?;

        Ok(Some(state))
    }

    fn save(&self, state: &TournamentState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).map_err(|e| TournamentError::StorageError {
            message: format!("Failed to serialize state: {}", e),
        })?;

        // Written beside the target, then renamed into place
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| TournamentError::StorageError {
            message: format!("Failed to write {}: {}", tmp.display(), e),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| TournamentError::StorageError {
            message: format!("Failed to replace {}: {}", self.path.display(), e),
        })?;

        info!("Saved tournament state to {}", self.path.display());
        Ok(())
    }
}
