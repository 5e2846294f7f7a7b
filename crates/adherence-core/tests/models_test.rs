use adherence_core::errors::{AdherenceError, ModelError, RecordError};
use adherence_core::models::*;
use chrono::{TimeZone, Utc};

#[test]
fn record_deserializes_with_optional_fields_absent() {
    let json = r#"{
        "id": "rec-1",
        "patient_id": "pat-1",
        "medication_id": "med-1",
        "scheduled_time": "2025-03-01T00:00:00Z",
        "status": "missed",
        "updated_at": "2025-03-01T02:00:00Z"
    }"#;
    let record: AdherenceRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.status, AdherenceStatus::Missed);
    assert!(record.taken_time.is_none());
    assert_eq!(record.adherence_score, 0);
    assert_eq!(record.method, RecordMethod::Manual);
    assert!(record.notes.is_empty());
    assert!(record.validate().is_ok());
}

#[test]
fn cultural_context_round_trips() {
    let mut record = AdherenceRecord::new(
        "rec-2",
        "pat-1",
        "med-1",
        Utc.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap(),
    );
    record.status = AdherenceStatus::Adjusted;
    record.taken_time = Some(record.scheduled_time);
    record.cultural_context = Some(CulturalContext {
        is_during_prayer: Some(true),
        is_during_fasting: Some(true),
        meal_timing: Some(MealTiming::Iftar),
        festival_name: None,
    });

    let json = serde_json::to_string(&record).unwrap();
    let back: AdherenceRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    assert!(back.during_prayer());
    assert!(back.during_fasting());
    assert!(back.cultural().has_signal());
}

#[test]
fn risk_levels_order_by_severity() {
    assert!(RiskLevel::Low < RiskLevel::Medium);
    assert!(RiskLevel::High < RiskLevel::Critical);
}

#[test]
fn timeframe_multipliers_never_increase() {
    let multipliers: Vec<f64> = Timeframe::ALL
        .iter()
        .map(|t| t.confidence_multiplier())
        .collect();
    assert!(multipliers.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn subsystem_errors_convert_into_top_level() {
    let err: AdherenceError = RecordError::MissingField {
        record_id: "r".into(),
        field: "id".into(),
    }
    .into();
    assert_eq!(err.error_code(), "RECORD_INVALID");

    let err: AdherenceError = ModelError::InvalidOutcome {
        field: "actual_outcome".into(),
        value: 2.0,
    }
    .into();
    assert_eq!(err.error_code(), "MODEL_ERROR");
    assert!(err.to_string().contains("actual_outcome"));
}
