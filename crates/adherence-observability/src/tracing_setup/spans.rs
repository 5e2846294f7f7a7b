//! Span definitions per operation: scoring, rate, streak, patterns, cultural, prediction, model update, sync.

/// Create a dose-scoring span.
#[macro_export]
macro_rules! scoring_span {
    ($record_id:expr) => {
        tracing::debug_span!("adherence.scoring", record_id = %$record_id)
    };
}

/// Create a rate/streak aggregation span.
#[macro_export]
macro_rules! aggregation_span {
    ($operation:expr, $record_count:expr) => {
        tracing::info_span!(
            "adherence.aggregation",
            operation = %$operation,
            record_count = $record_count
        )
    };
}

/// Create a pattern-detection span.
#[macro_export]
macro_rules! pattern_span {
    ($record_count:expr) => {
        tracing::info_span!("adherence.patterns", record_count = $record_count)
    };
}

/// Create a cultural-analysis span.
#[macro_export]
macro_rules! cultural_span {
    ($patient_id:expr, $record_count:expr) => {
        tracing::info_span!(
            "adherence.cultural",
            patient_id = %$patient_id,
            record_count = $record_count
        )
    };
}

/// Create a prediction span.
#[macro_export]
macro_rules! prediction_span {
    ($medication_id:expr, $record_count:expr) => {
        tracing::info_span!(
            "adherence.prediction",
            medication_id = %$medication_id,
            record_count = $record_count
        )
    };
}

/// Create a model-update span.
#[macro_export]
macro_rules! model_update_span {
    ($actual:expr, $predicted:expr) => {
        tracing::info_span!("adherence.model_update", actual = $actual, predicted = $predicted)
    };
}

/// Create a sync batch span.
#[macro_export]
macro_rules! sync_span {
    ($patient_id:expr, $batch_size:expr) => {
        tracing::info_span!(
            "adherence.sync",
            patient_id = %$patient_id,
            batch_size = $batch_size
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SCORING: &str = "adherence.scoring";
    pub const AGGREGATION: &str = "adherence.aggregation";
    pub const PATTERNS: &str = "adherence.patterns";
    pub const CULTURAL: &str = "adherence.cultural";
    pub const PREDICTION: &str = "adherence.prediction";
    pub const MODEL_UPDATE: &str = "adherence.model_update";
    pub const SYNC: &str = "adherence.sync";
}
