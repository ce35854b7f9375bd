//! Integration tests for stats persistence across manager instances

use srctrack::stats::{CodeStats, SourceKind, StatsManager};
use tempfile::tempdir;

#[test]
fn test_roundtrip_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");

    {
        let mut manager = StatsManager::with_path(&path);
        manager.record(SourceKind::Manual, 120);
        manager.record(SourceKind::Copied, 30);
        manager.record(SourceKind::Ai, 50);
    }

    let manager = StatsManager::with_path(&path);
    assert_eq!(manager.stats().manual_chars, 120);
    assert_eq!(manager.stats().copied_chars, 30);
    assert_eq!(manager.stats().ai_chars, 50);
    assert_eq!(manager.stats().total_chars(), 200);
    assert_eq!(manager.stats().percent(SourceKind::Manual), 60.0);
}

#[test]
fn test_fresh_instance_starts_at_zero_without_creating_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");

    let manager = StatsManager::with_path(&path);
    assert_eq!(manager.stats(), &CodeStats::default());
    for kind in SourceKind::ALL {
        assert_eq!(manager.stats().percent(kind), 0.0);
    }

    // Only a save creates the file.
    assert!(!path.exists());
}

#[test]
fn test_corrupt_file_resets_to_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(&path, "{\"manual_chars\": \"not a number\"}").unwrap();

    let manager = StatsManager::with_path(&path);
    assert_eq!(manager.stats(), &CodeStats::default());
}

#[test]
fn test_record_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("stats.json");

    let mut manager = StatsManager::with_path(&path);
    manager.record(SourceKind::Ai, 7);

    assert!(path.exists());
    let reloaded = StatsManager::with_path(&path);
    assert_eq!(reloaded.stats().ai_chars, 7);
}

#[test]
fn test_on_disk_format_is_indented_json_with_stable_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");

    let mut manager = StatsManager::with_path(&path);
    manager.record(SourceKind::Copied, 1234);

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["copied_chars"], 1234);
    assert_eq!(value["manual_chars"], 0);
    assert_eq!(value["ai_chars"], 0);
    // Pretty-printed, one field per line.
    assert!(content.lines().count() >= 5);
}

#[test]
fn test_extra_fields_in_file_do_not_break_loading() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stats.json");
    std::fs::write(
        &path,
        "{\"manual_chars\": 5, \"copied_chars\": 6, \"ai_chars\": 7, \"legacy\": true}",
    )
    .unwrap();

    let manager = StatsManager::with_path(&path);
    assert_eq!(manager.stats().total_chars(), 18);
}
