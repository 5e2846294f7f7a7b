//! Shared test support for the adherence workspace: record builders, Malaysia
//! time helpers, fixed calendar doubles, an in-memory record store, and golden
//! scenario loading.

pub mod builders;
pub mod doubles;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use builders::{daily_records, myt, myt_instant, RecordBuilder};
pub use doubles::{FixedFestivalCalendar, FixedPrayerTimes, InMemoryRecordStore};

/// Root directory of the golden scenarios.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use adherence_core::models::AdherenceRecord;

    #[test]
    fn all_golden_files_exist() {
        let files = [
            "scoring/dose_bands.json",
            "scoring/mixed_rate.json",
            "patterns/prayer_conflict.json",
            "sync/conflict_batch.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn all_golden_files_parse_as_json() {
        let mut total = 0;
        for dir in ["scoring", "patterns", "sync"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert_eq!(total, 4);
    }

    #[test]
    fn sync_fixture_records_deserialize() {
        let fixture = load_fixture_value("sync/conflict_batch.json");
        let stored: Vec<AdherenceRecord> =
            serde_json::from_value(fixture["stored"].clone()).unwrap();
        assert!(!stored.is_empty());
    }
}
