//! Conflict detection between an incoming record and its stored version.

use adherence_core::models::{AdherenceRecord, ConflictType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// No difference in any resolved field.
    Identical,
    Conflict(ConflictType),
}

/// Classify how `local` (incoming) differs from `remote` (stored).
///
/// Resolved fields: status, taken time, adherence score, notes (as a set)
/// and `updated_at`.
pub fn compare(local: &AdherenceRecord, remote: &AdherenceRecord) -> Comparison {
    if local.updated_at != remote.updated_at {
        return Comparison::Conflict(ConflictType::Timing);
    }
    if local.status != remote.status {
        return Comparison::Conflict(ConflictType::Status);
    }
    if local.taken_time == remote.taken_time
        && local.adherence_score == remote.adherence_score
        && normalized_notes(local) == normalized_notes(remote)
    {
        return Comparison::Identical;
    }
    Comparison::Conflict(ConflictType::Merge)
}

pub(crate) fn normalized_notes(record: &AdherenceRecord) -> Vec<String> {
    let mut notes = record.notes.clone();
    notes.sort();
    notes.dedup();
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use adherence_core::models::AdherenceStatus;
    use chrono::Duration;
    use test_fixtures::RecordBuilder;

    fn base() -> AdherenceRecord {
        RecordBuilder::new("r").status(AdherenceStatus::TakenOnTime).build()
    }

    #[test]
    fn same_record_is_identical() {
        assert_eq!(compare(&base(), &base()), Comparison::Identical);
    }

    #[test]
    fn note_order_and_duplicates_do_not_matter() {
        let mut a = base();
        a.notes = vec!["b".into(), "a".into(), "a".into()];
        let mut b = base();
        b.notes = vec!["a".into(), "b".into()];
        assert_eq!(compare(&a, &b), Comparison::Identical);
    }

    #[test]
    fn timestamp_difference_is_timing_even_with_equal_status() {
        let mut a = base();
        a.updated_at += Duration::minutes(1);
        assert_eq!(compare(&a, &base()), Comparison::Conflict(ConflictType::Timing));
    }

    #[test]
    fn tied_timestamps_with_different_status() {
        let mut a = base();
        a.status = AdherenceStatus::Missed;
        a.taken_time = None;
        assert_eq!(compare(&a, &base()), Comparison::Conflict(ConflictType::Status));
    }

    #[test]
    fn score_difference_is_merge() {
        let mut a = base();
        a.adherence_score = 90;
        assert_eq!(compare(&a, &base()), Comparison::Conflict(ConflictType::Merge));
    }
}
