//! Stats file persistence
//!
//! The stats record is a flat JSON object at a fixed per-user path
//! (`~/.srctrack/stats.json`). Load and save report their outcomes as
//! explicit values; the caller decides whether a failure is fatal, logged
//! or ignored.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::CodeStats;

/// File name of the persisted record under the srctrack directory
pub const STATS_FILE: &str = "stats.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read stats file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stats file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize stats record: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write stats file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and writes the persisted stats record
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location of the stats file (~/.srctrack/stats.json)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".srctrack")
            .join(STATS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record from disk. A missing file yields the zeroed record;
    /// loading never creates the file.
    pub fn load(&self) -> Result<CodeStats, StoreError> {
        if !self.path.exists() {
            return Ok(CodeStats::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the record as indented JSON, creating parent directories as needed
    pub fn save(&self, stats: &CodeStats) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(stats)
            .map_err(|source| StoreError::Serialize { source })?;

        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
