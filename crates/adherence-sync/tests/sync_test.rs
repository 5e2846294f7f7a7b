use std::sync::Arc;

use adherence_core::models::{
    AdherenceRecord, AdherenceStatus, BatchUpdate, ConflictType, Resolution, ResolutionStage,
};
use adherence_sync::SyncResolver;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use test_fixtures::{load_fixture_value, myt_instant, InMemoryRecordStore, RecordBuilder};

fn golden() -> (Vec<AdherenceRecord>, BatchUpdate, serde_json::Value) {
    let fixture = load_fixture_value("sync/conflict_batch.json");
    let stored = serde_json::from_value(fixture["stored"].clone()).unwrap();
    let batch = serde_json::from_value(fixture["batch"].clone()).unwrap();
    (stored, batch, fixture)
}

fn batch(records: Vec<AdherenceRecord>) -> BatchUpdate {
    BatchUpdate {
        patient_id: "patient-1".into(),
        device_id: Some("tablet-2".into()),
        records,
        synced_at: myt_instant(2025, 3, 10, 9, 0),
    }
}

#[test]
fn golden_conflict_batch() {
    let (stored, batch, fixture) = golden();
    let store = Arc::new(InMemoryRecordStore::with_records(stored));
    let result = SyncResolver::new(store.clone()).resolve_batch(&batch);

    assert!(result.success);
    assert_eq!(result.processed, 5);
    assert_eq!(result.merged_records.len(), 5);
    assert!(result.errors.is_empty());

    let expected = fixture["expected_conflicts"].as_array().unwrap();
    assert_eq!(result.conflicts.len(), expected.len());
    for (got, want) in result.conflicts.iter().zip(expected) {
        assert_eq!(got.record_id, want["record_id"].as_str().unwrap());
        assert_eq!(got.conflict_type.as_str(), want["conflict_type"].as_str().unwrap());
        assert_eq!(got.resolution.as_str(), want["resolution"].as_str().unwrap());
    }

    let merge = &fixture["expected_merge"];
    let merged = store
        .snapshot()
        .into_iter()
        .find(|r| r.id == merge["record_id"].as_str().unwrap())
        .unwrap();
    let taken: DateTime<Utc> = serde_json::from_value(merge["taken_time"].clone()).unwrap();
    assert_eq!(merged.taken_time, Some(taken));
    assert_eq!(u64::from(merged.adherence_score), merge["adherence_score"].as_u64().unwrap());
    let notes: Vec<String> = serde_json::from_value(merge["notes"].clone()).unwrap();
    assert_eq!(merged.notes, notes);

    let timing = store.snapshot().into_iter().find(|r| r.id == "rec-timing").unwrap();
    assert_eq!(timing.status, AdherenceStatus::TakenLate);
    assert_eq!(store.len(), 5);
}

#[test]
fn replaying_merged_output_changes_nothing() {
    let (stored, first, _) = golden();
    let store = Arc::new(InMemoryRecordStore::with_records(stored));
    let resolver = SyncResolver::new(store.clone());
    let merged = resolver.resolve_batch(&first).merged_records;
    let before = store.snapshot();

    let replay = resolver.resolve_batch(&batch(merged.clone()));
    assert!(replay.success);
    assert!(replay.conflicts.is_empty());
    assert_eq!(replay.merged_records, merged);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn older_incoming_version_loses() {
    let stored = RecordBuilder::new("r1")
        .patient("patient-1")
        .status(AdherenceStatus::TakenOnTime)
        .build();
    let mut stale = stored.clone();
    stale.status = AdherenceStatus::Missed;
    stale.taken_time = None;
    stale.delay_minutes = None;
    stale.updated_at = stored.updated_at - Duration::hours(3);

    let store = Arc::new(InMemoryRecordStore::with_records([stored.clone()]));
    let result = SyncResolver::new(store.clone()).resolve_batch(&batch(vec![stale]));
    assert_eq!(result.conflicts[0].conflict_type, ConflictType::Timing);
    assert_eq!(result.conflicts[0].resolution, Resolution::RemoteWins);
    assert_eq!(result.merged_records, vec![stored.clone()]);
    assert_eq!(store.snapshot(), vec![stored]);
}

#[test]
fn failures_are_isolated_per_record() {
    let good = RecordBuilder::new("good")
        .patient("patient-1")
        .status(AdherenceStatus::TakenOnTime)
        .build();
    let unwritable = RecordBuilder::new("unwritable")
        .patient("patient-1")
        .status(AdherenceStatus::Missed)
        .build();
    let mut invalid = RecordBuilder::new("invalid")
        .patient("patient-1")
        .status(AdherenceStatus::TakenLate)
        .build();
    invalid.taken_time = None;
    let foreign = RecordBuilder::new("foreign")
        .patient("patient-9")
        .status(AdherenceStatus::Missed)
        .build();

    let store = Arc::new(InMemoryRecordStore::new());
    store.fail_writes_for("unwritable");
    let result = SyncResolver::new(store.clone())
        .resolve_batch(&batch(vec![invalid, unwritable, good.clone(), foreign]));

    assert!(!result.success);
    assert_eq!(result.processed, 4);
    assert_eq!(result.merged_records, vec![good]);
    let stages: Vec<_> = result
        .errors
        .iter()
        .map(|e| (e.record_id.as_str(), e.stage))
        .collect();
    assert_eq!(
        stages,
        [
            ("invalid", ResolutionStage::Validate),
            ("unwritable", ResolutionStage::Write),
            ("foreign", ResolutionStage::Validate),
        ]
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn records_beyond_the_cap_are_rejected() {
    let records: Vec<_> = (0..4)
        .map(|i| {
            RecordBuilder::new(format!("r{i}"))
                .patient("patient-1")
                .status(AdherenceStatus::Missed)
                .build()
        })
        .collect();
    let store = Arc::new(InMemoryRecordStore::new());
    let result = SyncResolver::new(store.clone())
        .with_max_batch_size(3)
        .resolve_batch(&batch(records));
    assert_eq!(result.merged_records.len(), 3);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].record_id, "r3");
    assert!(result.errors[0].message.contains("exceeds 3"));
}

fn arb_status() -> impl Strategy<Value = AdherenceStatus> {
    prop_oneof![
        Just(AdherenceStatus::TakenOnTime),
        Just(AdherenceStatus::TakenLate),
        Just(AdherenceStatus::Missed),
        Just(AdherenceStatus::Skipped),
        Just(AdherenceStatus::Adjusted),
    ]
}

fn version(status: AdherenceStatus, minutes: i64, score: u8, note: u8) -> AdherenceRecord {
    let mut r = RecordBuilder::new("shared")
        .patient("patient-1")
        .status(status)
        .build();
    r.updated_at += Duration::minutes(minutes);
    r.adherence_score = score;
    r.notes = vec![format!("note-{note}")];
    r
}

proptest! {
    #[test]
    fn resolution_converges_regardless_of_arrival_order(
        (s1, s2) in (arb_status(), arb_status()),
        (m1, m2) in (0i64..3, 0i64..3),
        (c1, c2) in (0u8..=100, 0u8..=100),
        (n1, n2) in (0u8..3, 0u8..3),
    ) {
        let a = version(s1, m1, c1, n1);
        let b = version(s2, m2, c2, n2);

        let first = Arc::new(InMemoryRecordStore::with_records([a.clone()]));
        SyncResolver::new(first.clone()).resolve_batch(&batch(vec![b.clone()]));
        let second = Arc::new(InMemoryRecordStore::with_records([b]));
        SyncResolver::new(second.clone()).resolve_batch(&batch(vec![a]));

        let (x, y) = (first.snapshot(), second.snapshot());
        prop_assert_eq!(x[0].status, y[0].status);
        prop_assert_eq!(x[0].updated_at, y[0].updated_at);
        prop_assert_eq!(x[0].adherence_score, y[0].adherence_score);
        prop_assert_eq!(&x[0].notes, &y[0].notes);
    }
}
