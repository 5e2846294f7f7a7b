//! Conflict resolution rules.

use adherence_core::models::{AdherenceRecord, ConflictType, Resolution};

use crate::detection::normalized_notes;

/// The authoritative record after resolving a conflict.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionOutcome {
    pub winner: AdherenceRecord,
    pub conflict_type: ConflictType,
    pub resolution: Resolution,
}

/// Resolve a detected conflict between `local` (incoming) and `remote` (stored).
pub fn resolve(
    local: &AdherenceRecord,
    remote: &AdherenceRecord,
    conflict_type: ConflictType,
) -> ResolutionOutcome {
    let local_wins = match conflict_type {
        ConflictType::Timing => local.updated_at > remote.updated_at,
        ConflictType::Status => match (local.status.is_taken(), remote.status.is_taken()) {
            (true, false) => true,
            (false, true) => false,
            _ => local.status.precedence() > remote.status.precedence(),
        },
        ConflictType::Merge => {
            return ResolutionOutcome {
                winner: merge(local, remote),
                conflict_type,
                resolution: Resolution::Merged,
            }
        }
    };

    let (winner, resolution) = if local_wins {
        (local.clone(), Resolution::LocalWins)
    } else {
        (remote.clone(), Resolution::RemoteWins)
    };
    ResolutionOutcome {
        winner,
        conflict_type,
        resolution,
    }
}

/// Field-wise merge of two versions with the same status and timestamp.
///
/// Notes are unioned (sorted, deduplicated), the score is the max, the
/// taken time is the latest non-null one, and `updated_at` the latest. The
/// remaining fields come from whichever version carried the latest taken
/// time so `delay_minutes` stays consistent with it.
pub fn merge(local: &AdherenceRecord, remote: &AdherenceRecord) -> AdherenceRecord {
    let base = if remote.taken_time > local.taken_time {
        remote
    } else {
        local
    };
    let mut notes = normalized_notes(local);
    notes.extend(normalized_notes(remote));
    notes.sort();
    notes.dedup();

    AdherenceRecord {
        notes,
        adherence_score: local.adherence_score.max(remote.adherence_score),
        taken_time: local.taken_time.max(remote.taken_time),
        updated_at: local.updated_at.max(remote.updated_at),
        ..base.clone()
    }
}
