//! SyncResolver: applies the resolution rules to a batch and writes back winners.

use std::sync::Arc;

use adherence_core::constants::MAX_SYNC_BATCH_SIZE;
use adherence_core::errors::SyncError;
use adherence_core::models::{
    AdherenceRecord, BatchResult, BatchUpdate, ConflictRecord, RecordFailure, ResolutionStage,
};
use adherence_core::traits::RecordStore;
use adherence_observability::events;

use crate::detection::{compare, Comparison};
use crate::resolution::resolve;

/// Per-record outcome before it is folded into the batch result.
struct Resolved {
    record: AdherenceRecord,
    conflict: Option<ConflictRecord>,
}

struct Failed {
    stage: ResolutionStage,
    message: String,
}

impl Failed {
    fn at(stage: ResolutionStage, err: impl std::fmt::Display) -> Self {
        Self {
            stage,
            message: err.to_string(),
        }
    }
}

/// Resolves offline batches against the authoritative store.
///
/// Records are handled sequentially in batch order. A failing record is
/// reported with its stage and never aborts its siblings. Replaying
/// `merged_records` as a new batch changes nothing.
pub struct SyncResolver {
    store: Arc<dyn RecordStore>,
    max_batch_size: usize,
}

impl SyncResolver {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            max_batch_size: MAX_SYNC_BATCH_SIZE,
        }
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max;
        self
    }

    pub fn resolve_batch(&self, batch: &BatchUpdate) -> BatchResult {
        let mut result = BatchResult {
            processed: batch.records.len(),
            ..Default::default()
        };

        for (index, local) in batch.records.iter().enumerate() {
            let outcome = if index >= self.max_batch_size {
                Err(Failed::at(
                    ResolutionStage::Validate,
                    SyncError::BatchTooLarge {
                        size: batch.records.len(),
                        max: self.max_batch_size,
                    },
                ))
            } else {
                self.resolve_record(&batch.patient_id, local)
            };

            match outcome {
                Ok(resolved) => {
                    if let Some(conflict) = resolved.conflict {
                        events::conflict_resolved(
                            &conflict.record_id,
                            &batch.patient_id,
                            conflict.conflict_type.as_str(),
                            conflict.resolution.as_str(),
                        );
                        result.conflicts.push(conflict);
                    }
                    result.merged_records.push(resolved.record);
                }
                Err(failed) => {
                    events::record_failed(
                        &local.id,
                        &batch.patient_id,
                        failed.stage.as_str(),
                        &failed.message,
                    );
                    result.errors.push(RecordFailure {
                        record_id: local.id.clone(),
                        stage: failed.stage,
                        message: failed.message,
                    });
                }
            }
        }

        result.success = result.errors.is_empty();
        events::batch_resolved(
            &batch.patient_id,
            result.processed,
            result.conflicts.len(),
            result.errors.len(),
        );
        result
    }

    fn resolve_record(&self, patient_id: &str, local: &AdherenceRecord) -> Result<Resolved, Failed> {
        local
            .validate()
            .map_err(|e| Failed::at(ResolutionStage::Validate, e))?;
        if local.patient_id != patient_id {
            return Err(Failed::at(
                ResolutionStage::Validate,
                SyncError::PatientMismatch {
                    record_id: local.id.clone(),
                    expected: patient_id.to_string(),
                    found: local.patient_id.clone(),
                },
            ));
        }

        let remote = self
            .store
            .get(&local.id)
            .map_err(|e| Failed::at(ResolutionStage::Read, e))?;

        let Some(remote) = remote else {
            self.write(local)?;
            return Ok(Resolved {
                record: local.clone(),
                conflict: None,
            });
        };

        if remote.patient_id != patient_id {
            return Err(Failed::at(
                ResolutionStage::Resolve,
                SyncError::PatientMismatch {
                    record_id: remote.id.clone(),
                    expected: patient_id.to_string(),
                    found: remote.patient_id.clone(),
                },
            ));
        }

        let conflict_type = match compare(local, &remote) {
            Comparison::Identical => {
                tracing::debug!(record_id = %local.id, "record unchanged");
                return Ok(Resolved {
                    record: remote,
                    conflict: None,
                })
            }
            Comparison::Conflict(t) => t,
        };

        let outcome = resolve(local, &remote, conflict_type);
        if outcome.winner != remote {
            self.write(&outcome.winner)?;
        }
        Ok(Resolved {
            conflict: Some(ConflictRecord {
                record_id: local.id.clone(),
                conflict_type: outcome.conflict_type,
                resolution: outcome.resolution,
                local_updated_at: local.updated_at,
                remote_updated_at: remote.updated_at,
            }),
            record: outcome.winner,
        })
    }

    fn write(&self, record: &AdherenceRecord) -> Result<(), Failed> {
        self.store
            .put(record)
            .map_err(|e| Failed::at(ResolutionStage::Write, e))
    }
}
