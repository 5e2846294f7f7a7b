/// Input contract violations on a single adherence record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record {record_id}: status {status} requires a taken time")]
    MissingTakenTime { record_id: String, status: String },

    #[error("record {record_id}: status {status} must not carry a taken time")]
    UnexpectedTakenTime { record_id: String, status: String },

    #[error("record {record_id}: missing required field {field}")]
    MissingField { record_id: String, field: String },

    #[error("record {record_id}: adherence score {score} exceeds 100")]
    ScoreOutOfRange { record_id: String, score: u8 },
}

impl RecordError {
    /// The id of the offending record.
    pub fn record_id(&self) -> &str {
        match self {
            Self::MissingTakenTime { record_id, .. }
            | Self::UnexpectedTakenTime { record_id, .. }
            | Self::MissingField { record_id, .. }
            | Self::ScoreOutOfRange { record_id, .. } => record_id,
        }
    }
}
