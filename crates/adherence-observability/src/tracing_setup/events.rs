//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a record rejected for violating the input contract.
pub fn record_rejected(record_id: &str, patient_id: &str, medication_id: &str, stage: &str, reason: &str) {
    tracing::warn!(
        event = "record_rejected",
        record_id = %record_id,
        patient_id = %patient_id,
        medication_id = %medication_id,
        stage = %stage,
        reason = %reason,
        "record rejected"
    );
}

/// Log a resolved sync conflict.
pub fn conflict_resolved(record_id: &str, patient_id: &str, conflict_type: &str, resolution: &str) {
    tracing::info!(
        event = "conflict_resolved",
        record_id = %record_id,
        patient_id = %patient_id,
        conflict_type = %conflict_type,
        resolution = %resolution,
        "sync conflict resolved"
    );
}

/// Log a record that failed batch resolution.
pub fn record_failed(record_id: &str, patient_id: &str, stage: &str, reason: &str) {
    tracing::warn!(
        event = "record_failed",
        record_id = %record_id,
        patient_id = %patient_id,
        stage = %stage,
        reason = %reason,
        "sync record failed"
    );
}

/// Log a completed sync batch.
pub fn batch_resolved(patient_id: &str, processed: usize, conflicts: usize, failures: usize) {
    tracing::info!(
        event = "batch_resolved",
        patient_id = %patient_id,
        processed = processed,
        conflicts = conflicts,
        failures = failures,
        "sync batch resolved"
    );
}

/// Log a detected pattern.
pub fn pattern_detected(pattern_type: &str, confidence: f64, occurrences: usize) {
    tracing::debug!(
        event = "pattern_detected",
        pattern_type = %pattern_type,
        confidence = confidence,
        occurrences = occurrences,
        "pattern detected"
    );
}

/// Log a failed prayer-time or festival lookup. The date is skipped.
pub fn calendar_lookup_failed(patient_id: &str, lookup: &str, reason: &str) {
    tracing::warn!(
        event = "calendar_lookup_failed",
        patient_id = %patient_id,
        lookup = %lookup,
        reason = %reason,
        "calendar lookup failed"
    );
}

/// Log an applied model update.
pub fn model_updated(version: u64, error: f64, bias: f64) {
    tracing::info!(
        event = "model_updated",
        version = version,
        error = error,
        bias = bias,
        "prediction model updated"
    );
}

/// Log a rejected model update. The model is unchanged.
pub fn model_update_rejected(stage: &str, reason: &str) {
    tracing::warn!(
        event = "model_update_rejected",
        stage = %stage,
        reason = %reason,
        "prediction model update rejected"
    );
}

/// Log generated predictions for a medication.
pub fn predictions_generated(medication_id: &str, risk_level: &str, score: f64) {
    tracing::info!(
        event = "predictions_generated",
        medication_id = %medication_id,
        risk_level = %risk_level,
        score = score,
        "predictions generated"
    );
}

/// Log an explicit cache invalidation.
pub fn cache_invalidated(cache: &str, scope: &str) {
    tracing::debug!(
        event = "cache_invalidated",
        cache = %cache,
        scope = %scope,
        "cache invalidated"
    );
}
