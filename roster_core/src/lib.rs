//! roster_core - Durable roster of captured wrestlers
//!
//! Owns the capacity-bounded roster, the single active player wrestler and
//! the set of defeated encounter ids, all persisted through a pluggable
//! key-value [`Storage`] backend.

mod config;
mod opponents;
mod registry;
mod storage;

pub use config::{DefaultPlayerConfig, RosterConfig};
pub use opponents::{generate_opponent, DEFAULT_CANDIDATE_NAMES};
pub use registry::{RosterStore, RosterSummary};
pub use storage::{FileStorage, MemoryStorage, Storage, DEFEATED_NPCS_KEY, PLAYER_KEY, ROSTER_KEY};

use std::path::PathBuf;
use thiserror::Error;
use wrestler_core::WrestlerId;

/// Rejected or failed roster operation
///
/// These are expected outcomes the caller branches on, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Roster is full! Max {capacity} wrestlers allowed.")]
    Full { capacity: usize },
    #[error("{0} is already in your roster!")]
    DuplicateName(String),
    #[error("No wrestler with id {0} in the roster")]
    NotFound(WrestlerId),
}

/// Error reading or writing the key-value backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Serialization error for key '{key}': {error}")]
    Json {
        error: serde_json::Error,
        key: String,
    },
}

/// Error loading roster configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}
