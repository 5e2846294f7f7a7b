/// Errors raised by the external record store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("record {record_id} could not be read: {reason}")]
    ReadFailed { record_id: String, reason: String },

    #[error("record {record_id} could not be written: {reason}")]
    WriteFailed { record_id: String, reason: String },
}

/// Errors raised while resolving an offline sync batch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    #[error("batch exceeds {max} records: {size}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("record {record_id} belongs to patient {found}, batch is for {expected}")]
    PatientMismatch {
        record_id: String,
        expected: String,
        found: String,
    },
}
