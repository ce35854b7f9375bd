//! Provenance statistics tracking
//!
//! Keeps running per-source character counters and persists them as a flat
//! JSON record (`~/.srctrack/stats.json`). Every mutation writes the file
//! back immediately; persistence is best-effort, so the tool keeps working
//! in memory when the disk misbehaves.
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = StatsManager::new();
//!
//! // Record a declared block
//! stats.record(SourceKind::Ai, 350);
//!
//! // Render the dashboard text
//! println!("{}", stats.summary());
//! ```

mod models;
mod store;

pub use models::{format_chars, CodeStats, SourceKind, StatsReport};
pub use store::{StatsStore, StoreError, STATS_FILE};

use std::path::Path;

use tracing::warn;

/// Central manager for provenance statistics
///
/// Owns the in-memory record and the backing store. Construction never
/// fails: a missing file starts the counters at zero, and an unreadable or
/// corrupt file resets them to zero with the reason logged.
pub struct StatsManager {
    stats: CodeStats,
    store: StatsStore,
}

impl StatsManager {
    /// Create a manager backed by the default stats file location
    pub fn new() -> Self {
        Self::with_store(StatsStore::new(StatsStore::default_path()))
    }

    /// Create a manager backed by a custom stats file path
    pub fn with_path(path: &Path) -> Self {
        Self::with_store(StatsStore::new(path.to_path_buf()))
    }

    fn with_store(store: StatsStore) -> Self {
        let stats = match store.load() {
            Ok(stats) => stats,
            Err(err @ StoreError::Parse { .. }) => {
                // Data-loss-on-corruption policy: no partial recovery.
                warn!("Resetting counters to zero: {}", err);
                CodeStats::default()
            }
            Err(err) => {
                warn!("Could not load stats, starting from zero: {}", err);
                CodeStats::default()
            }
        };
        Self { stats, store }
    }

    /// Record `chars` characters as `kind`, then persist.
    ///
    /// A failed save is logged and swallowed; the in-memory counters stay
    /// authoritative until the next successful write.
    pub fn record(&mut self, kind: SourceKind, chars: u64) {
        self.stats.add(kind, chars);
        self.persist();
    }

    /// Zero all counters and persist
    pub fn reset(&mut self) {
        self.stats = CodeStats::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.stats) {
            warn!("Failed to save stats: {}", err);
        }
    }

    pub fn stats(&self) -> &CodeStats {
        &self.stats
    }

    pub fn summary(&self) -> String {
        self.stats.summary()
    }

    /// Path of the backing stats file
    pub fn file_path(&self) -> &Path {
        self.store.path()
    }
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_record_accumulates_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut manager = StatsManager::with_path(&path);
        manager.record(SourceKind::Manual, 120);
        manager.record(SourceKind::Copied, 30);
        manager.record(SourceKind::Ai, 50);

        assert_eq!(manager.stats().total_chars(), 200);
        assert!(path.exists());

        // A fresh manager sees the persisted counters.
        let reloaded = StatsManager::with_path(&path);
        assert_eq!(reloaded.stats().manual_chars, 120);
        assert_eq!(reloaded.stats().copied_chars, 30);
        assert_eq!(reloaded.stats().ai_chars, 50);
    }

    #[test]
    fn test_fresh_manager_does_not_create_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let manager = StatsManager::with_path(&path);
        assert_eq!(manager.stats(), &CodeStats::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_resets_counters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        std::fs::write(&path, b"\x00garbage\xff").unwrap();

        let manager = StatsManager::with_path(&path);
        assert_eq!(manager.stats().total_chars(), 0);
        for kind in SourceKind::ALL {
            assert_eq!(manager.stats().percent(kind), 0.0);
        }
    }

    #[test]
    fn test_reset_persists_zeroes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut manager = StatsManager::with_path(&path);
        manager.record(SourceKind::Ai, 500);
        manager.reset();

        let reloaded = StatsManager::with_path(&path);
        assert_eq!(reloaded.stats(), &CodeStats::default());
    }
}
