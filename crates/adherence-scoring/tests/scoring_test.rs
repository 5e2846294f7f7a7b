//! Golden scenarios for dose scoring, rates, streaks and the metrics cache.

use adherence_core::config::{CacheConfig, RateConfig, StreakConfig};
use adherence_core::models::{AdherenceStatus, MealTiming, RecordMethod};
use adherence_scoring::{
    DoseScorer, MetricsCache, MetricsCalculator, MetricsKey, RateCalculator, StreakCalculator,
};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use test_fixtures::{daily_records, load_fixture_value, myt, myt_instant, RecordBuilder};

fn status_of(v: &Value) -> AdherenceStatus {
    serde_json::from_value(v.clone()).expect("status")
}

#[test]
fn golden_dose_bands() {
    let fixture = load_fixture_value("scoring/dose_bands.json");
    let scorer = DoseScorer::default();

    for (i, case) in fixture["cases"].as_array().unwrap().iter().enumerate() {
        let mut builder = RecordBuilder::new(format!("case-{i}"))
            .status(status_of(&case["status"]))
            .taken_after(case["deviation_minutes"].as_i64().unwrap());
        if case["prayer"].as_bool().unwrap_or(false) {
            builder = builder.during_prayer();
        }
        if case["fasting"].as_bool().unwrap_or(false) {
            builder = builder.during_fasting();
        }
        let record = builder.build();
        assert_eq!(
            u64::from(scorer.score(&record).unwrap()),
            case["expected"].as_u64().unwrap(),
            "case {i}: {case}"
        );
    }
}

#[test]
fn golden_mixed_rate() {
    let fixture = load_fixture_value("scoring/mixed_rate.json");
    let calc = RateCalculator::new(RateConfig {
        late_window_hours: fixture["late_window_hours"].as_f64().unwrap(),
        ..Default::default()
    });

    let mut records = Vec::new();
    for group in fixture["groups"].as_array().unwrap() {
        let status = status_of(&group["status"]);
        for _ in 0..group["count"].as_u64().unwrap() {
            let n = records.len() as i64;
            records.push(
                RecordBuilder::new(format!("r{n}"))
                    .scheduled(myt_instant(2025, 1, 1, 8, 0) + Duration::hours(n * 8))
                    .status(status)
                    .taken_after(group["deviation_minutes"].as_i64().unwrap())
                    .build(),
            );
        }
    }
    assert_eq!(records.len(), 100);

    let rate = calc.calculate(&records).unwrap();
    assert_eq!(rate, fixture["expected_rate"].as_f64().unwrap());
    assert!(rate > 80.0 && rate < 90.0);
}

#[test]
fn reminder_and_cultural_bonuses_combine_under_cap() {
    let record = RecordBuilder::new("r")
        .status(AdherenceStatus::TakenLate)
        .reminder_before(0)
        .taken_after(3)
        .meal(MealTiming::Iftar)
        .during_fasting()
        .build();
    // On-time band already at 100; bonuses cannot exceed the cap.
    assert_eq!(DoseScorer::default().score(&record).unwrap(), 100);

    let late = RecordBuilder::new("r2")
        .status(AdherenceStatus::TakenLate)
        .taken_after(150)
        .method(RecordMethod::ReminderResponse)
        .build();
    let mut reminded = late.clone();
    reminded.reminder_sent_at = late.taken_time.map(|t| t - Duration::minutes(2));
    let scorer = DoseScorer::default();
    assert_eq!(scorer.score(&late).unwrap(), 50);
    assert_eq!(scorer.score(&reminded).unwrap(), 55);
}

#[test]
fn streak_over_ramadan_style_gap_with_48h_window() {
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let mut statuses = vec![AdherenceStatus::TakenOnTime; 10];
    statuses[4] = AdherenceStatus::Missed;
    let records = daily_records("p", "m", start, 21, &statuses);
    let as_of = records.last().unwrap().scheduled_time + Duration::hours(1);

    let strict = StreakCalculator::new(StreakConfig::default(), myt()).calculate(&records, as_of);
    assert_eq!(strict.longest_streak, 5);
    assert_eq!(strict.current_streak, 5);

    let lenient = StreakCalculator::new(
        StreakConfig {
            recovery_window_hours: 48,
        },
        myt(),
    )
    .calculate(&records, as_of);
    assert_eq!(lenient.longest_streak, 9);
    assert_eq!(lenient.current_streak, 9);
}

#[test]
fn late_evening_doses_bucket_by_local_date() {
    // 23:30 local is 15:30 UTC the same day; 00:30 local is the previous UTC day.
    let records = vec![
        RecordBuilder::new("a")
            .scheduled(myt_instant(2025, 3, 1, 23, 30))
            .status(AdherenceStatus::TakenOnTime)
            .build(),
        RecordBuilder::new("b")
            .scheduled(myt_instant(2025, 3, 2, 0, 30))
            .status(AdherenceStatus::TakenOnTime)
            .build(),
    ];
    let as_of = myt_instant(2025, 3, 2, 12, 0);
    let data = StreakCalculator::new(StreakConfig::default(), myt()).calculate(&records, as_of);
    assert_eq!(data.longest_streak, 2);
    assert_eq!(data.current_streak_end, NaiveDate::from_ymd_opt(2025, 3, 2));
}

#[test]
fn metrics_cache_round_trip_and_invalidation() {
    let records = daily_records(
        "p1",
        "m1",
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        8,
        &[AdherenceStatus::TakenOnTime, AdherenceStatus::Missed],
    );
    let metrics = MetricsCalculator::default().summarize(&records, None).unwrap();
    assert_eq!(metrics.weighted_rate, 50.0);

    let cache = MetricsCache::new(&CacheConfig::default());
    let key = MetricsKey::new("p1", Some("m1".to_string()), None);
    cache.insert(key.clone(), metrics.clone());
    assert_eq!(cache.get(&key), Some(metrics));

    cache.invalidate_patient("p1");
    assert!(cache.get(&key).is_none());
    assert_eq!(cache.entry_count(), 0);
}
