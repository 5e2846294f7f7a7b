use std::sync::Arc;
use std::thread;

use adherence_core::config::AdherenceConfig;
use adherence_core::models::{
    AdherenceStatus, CulturalPattern, FeatureVector, Medication, PatternType, RiskLevel, Timeframe,
};
use adherence_patterns::PatternDetector;
use adherence_prediction::{ModelStore, PredictionEngine};
use chrono::{NaiveDate, Utc};
use test_fixtures::daily_records;

fn history(statuses: &[AdherenceStatus], hour: u32) -> Vec<adherence_core::AdherenceRecord> {
    daily_records(
        "patient-1",
        "med-1",
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        hour,
        statuses,
    )
}

#[test]
fn confidence_never_increases_with_horizon() {
    let records = history(&[AdherenceStatus::TakenOnTime; 120], 8);
    let preds = PredictionEngine::default()
        .generate(
            &Medication::new("med-1", "Metformin", 1),
            &records,
            &[],
            &CulturalPattern::default(),
            Utc::now(),
        )
        .unwrap();
    assert!(preds.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    assert_eq!(preds[0].confidence, 0.8);
    assert_eq!(preds[3].timeframe, Timeframe::NextMonth);
}

#[test]
fn detected_evening_misses_shape_recommendations() {
    let statuses: Vec<_> = (0..30)
        .map(|d| {
            if d % 2 == 0 {
                AdherenceStatus::Missed
            } else {
                AdherenceStatus::TakenOnTime
            }
        })
        .collect();
    let records = history(&statuses, 20);
    let patterns = PatternDetector::default().detect(&records);
    assert!(patterns
        .iter()
        .any(|p| p.pattern_type == PatternType::EveningMissed));

    let preds = PredictionEngine::default()
        .generate(
            &Medication::new("med-1", "Metformin", 1),
            &records,
            &patterns,
            &CulturalPattern::default(),
            Utc::now(),
        )
        .unwrap();
    let next_dose = &preds[0];
    assert!(next_dose.risk_level >= RiskLevel::High);
    assert!(next_dose
        .recommendations
        .iter()
        .any(|r| r.category == "timing"));
    assert!(next_dose.recommendations.len() <= 5);
}

#[test]
fn concurrent_updates_are_serialized() {
    let store = Arc::new(ModelStore::default());
    let features = FeatureVector {
        historical_adherence: 0.9,
        recent_trend: 0.5,
        streak_length: 0.4,
        ..Default::default()
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..25 {
                    store.update(1.0, 0.6, &features).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let model = store.snapshot().unwrap();
    assert_eq!(model.version, 200);
    // Every step adds lr × 0.4 to the bias, regardless of interleaving.
    assert!((model.bias - (0.30 + 200.0 * 0.01 * 0.4)).abs() < 1e-9);
}

#[test]
fn engines_sharing_a_store_see_each_others_updates() {
    let config = AdherenceConfig::default();
    let store = Arc::new(ModelStore::new(&config.prediction));
    let a = PredictionEngine::new(&config, Arc::clone(&store));
    let b = PredictionEngine::new(&config, Arc::clone(&store));

    a.update_model(0.0, 0.9, &FeatureVector::default()).unwrap();
    assert_eq!(b.store().version().unwrap(), 1);
}
