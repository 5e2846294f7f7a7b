use adherence_core::models::AdherenceStatus;
use adherence_scoring::{DoseScorer, MetricsCalculator, RateCalculator, StreakCalculator};
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use test_fixtures::{daily_records, myt, RecordBuilder};

fn year_of_doses() -> Vec<adherence_core::models::AdherenceRecord> {
    let statuses: Vec<AdherenceStatus> = (0..365)
        .map(|i| match i % 10 {
            0 => AdherenceStatus::Missed,
            1 | 2 => AdherenceStatus::TakenLate,
            3 => AdherenceStatus::Adjusted,
            _ => AdherenceStatus::TakenOnTime,
        })
        .collect();
    daily_records(
        "bench-patient",
        "bench-med",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        8,
        &statuses,
    )
}

fn bench_score_single(c: &mut Criterion) {
    let scorer = DoseScorer::default();
    let record = RecordBuilder::new("r")
        .status(AdherenceStatus::TakenLate)
        .taken_after(47)
        .during_prayer()
        .reminder_before(0)
        .build();

    c.bench_function("score_dose_single", |b| b.iter(|| scorer.score(&record).unwrap()));
}

fn bench_rate_year(c: &mut Criterion) {
    let calc = RateCalculator::default();
    let records = year_of_doses();
    c.bench_function("weighted_rate_365", |b| b.iter(|| calc.calculate(&records).unwrap()));
}

fn bench_streak_year(c: &mut Criterion) {
    let calc = StreakCalculator::new(Default::default(), myt());
    let records = year_of_doses();
    let as_of = records[364].scheduled_time + Duration::hours(1);
    c.bench_function("streaks_365", |b| b.iter(|| calc.calculate(&records, as_of)));
}

fn bench_metrics_year(c: &mut Criterion) {
    let calc = MetricsCalculator::default();
    let records = year_of_doses();
    c.bench_function("metrics_summary_365", |b| {
        b.iter(|| calc.summarize(&records, None).unwrap())
    });
}

criterion_group!(
    benches,
    bench_score_single,
    bench_rate_year,
    bench_streak_year,
    bench_metrics_year
);
criterion_main!(benches);
