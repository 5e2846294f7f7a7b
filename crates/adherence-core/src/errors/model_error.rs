/// Predictive model errors. A rejected update leaves the model unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid feature {feature}: {value} (must be finite and within [0, 1])")]
    InvalidFeatureVector { feature: String, value: f64 },

    #[error("invalid {field}: {value} (must be finite and within [0, 1])")]
    InvalidOutcome { field: String, value: f64 },

    #[error("model lock poisoned during {stage}")]
    LockPoisoned { stage: String },

    #[error("no records available for medication {medication_id}")]
    NoRecords { medication_id: String },

    #[error("records for medication {medication_id} span several patients: {patients:?}")]
    MixedPatients {
        medication_id: String,
        patients: Vec<String>,
    },
}
