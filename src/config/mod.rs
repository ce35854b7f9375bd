//! Configuration loading and management
//!
//! The global config lives at `~/.srctrack/config.toml` and is created with
//! defaults on first load. Writes go through an exclusive lock plus a
//! temp-file rename so a racing CLI and server cannot corrupt the file.

mod settings;

pub use settings::{HttpSettings, Settings};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::stats::StatsStore;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Get the global config directory path (~/.srctrack/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".srctrack")
    }

    /// Get the global config file path (~/.srctrack/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the global configuration, creating it with defaults when missing
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            Self::auto_init(&global_path)?;
        }

        Self::from_file(&global_path)
    }

    /// Save configuration to a file with atomic write and file locking
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let _lock = acquire_lock(path)?;
        write_atomic(path, &content)
    }

    /// Auto-initialize the global configuration when none exists.
    ///
    /// Re-checks after acquiring the lock so racing processes (CLI and
    /// server starting together) initialize it exactly once.
    fn auto_init(path: &Path) -> Result<()> {
        let _lock = acquire_lock(path)?;

        if path.exists() {
            return Ok(());
        }

        let content = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        write_atomic(path, &content)?;

        eprintln!("Created {}", path.display());
        Ok(())
    }

    /// Resolved stats file path: configured override or the default location
    pub fn stats_path(&self) -> PathBuf {
        self.settings
            .stats_path
            .clone()
            .unwrap_or_else(StatsStore::default_path)
    }
}

/// Create the parent directory and take the exclusive config lock.
/// The lock is released when the returned file handle drops.
fn acquire_lock(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    // Lock file is separate from the config to avoid issues with rename
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .context("Failed to acquire config lock")?;

    Ok(lock_file)
}

/// Write `content` via a temp file and atomic rename
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write config content")?;

    temp_file.sync_all().context("Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}
