//! Filesystem-backed document storage.
//!
//! JSONL files are the source of truth for the two collections:
//! - `players.jsonl` holds player identities
//! - `scores.jsonl` holds play records
//!
//! The image cache for game thumbnails lives alongside them.

use std::path::PathBuf;
use thiserror::Error;

mod jsonl;
mod store;

pub use jsonl::JsonlFile;
pub use store::{Snapshot, Store};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.jsonl")
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join("scores.jsonl")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("game-images")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
