//! Feature extraction.
//!
//! Pure: the same records, medication, and cultural analysis always yield the
//! same vector. Time-relative features anchor on the latest scheduled dose,
//! never on the wall clock.

use std::collections::BTreeMap;

use chrono::{Duration, FixedOffset, NaiveDate};
use statrs::statistics::Statistics;

use adherence_core::config::AdherenceConfig;
use adherence_core::errors::RecordError;
use adherence_core::models::{
    AdherenceRecord, AdherenceStatus, CulturalPattern, FeatureVector, Medication, RecordMethod,
};
use adherence_core::time;
use adherence_scoring::consistency::consistency_report;
use adherence_scoring::{RateCalculator, StreakCalculator};

/// Days in each half of the recent-trend comparison.
const TREND_WINDOW_DAYS: i64 = 7;
/// Current streak that saturates the streak feature.
const STREAK_SATURATION_DAYS: f64 = 30.0;
/// Mean absolute delay that saturates the delay feature.
const DELAY_SATURATION_MINUTES: f64 = 120.0;
/// Standard deviation of daily rates (points) that zeroes stability.
const STABILITY_SATURATION_POINTS: f64 = 50.0;

pub struct FeatureExtractor {
    rate: RateCalculator,
    streaks: StreakCalculator,
    offset: FixedOffset,
}

impl FeatureExtractor {
    pub fn new(rate: RateCalculator, streaks: StreakCalculator, offset: FixedOffset) -> Self {
        Self {
            rate,
            streaks,
            offset,
        }
    }

    pub fn from_config(config: &AdherenceConfig) -> Self {
        let offset = config.timezone.offset();
        Self::new(
            RateCalculator::new(config.rate.clone()),
            StreakCalculator::new(config.streak.clone(), offset),
            offset,
        )
    }

    /// Build the 12-feature vector for `medication` from its records.
    /// Callers pass only the records belonging to `medication`.
    pub fn extract(
        &self,
        medication: &Medication,
        records: &[AdherenceRecord],
        cultural: &CulturalPattern,
    ) -> Result<FeatureVector, RecordError> {
        let relevant: Vec<&AdherenceRecord> = records
            .iter()
            .filter(|r| r.status.counts_toward_rate())
            .collect();
        let relevant_count = relevant.len();

        let historical_adherence = self.rate.calculate(records)? / 100.0;

        let streak_length = match records.iter().map(|r| r.scheduled_time).max() {
            Some(as_of) => {
                let streaks = self.streaks.calculate(records, as_of);
                f64::from(streaks.current_streak) / STREAK_SATURATION_DAYS
            }
            None => 0.0,
        };

        let missed = relevant
            .iter()
            .filter(|r| r.status == AdherenceStatus::Missed)
            .count();
        let missed_dose_frequency = ratio(missed, relevant_count);

        let delays: Vec<f64> = relevant
            .iter()
            .filter(|r| r.status.is_dose_taken())
            .filter_map(|r| r.deviation_minutes())
            .map(|d| d.abs() as f64)
            .collect();
        let delay_pattern = if delays.is_empty() {
            0.0
        } else {
            delays.iter().mean() / DELAY_SATURATION_MINUTES
        };

        let report = consistency_report(records, self.offset);
        let day_of_week_effect = spread(report.by_weekday.iter().map(|(_, s)| s.adherence_rate));
        let time_of_day_effect = spread(report.by_time_slot.iter().map(|(_, s)| s.adherence_rate));

        let daily = self.daily_rates(&relevant);
        let recent_trend = recent_trend(&daily);
        let health_status_stability = stability(&daily);

        let family_reported = relevant
            .iter()
            .filter(|r| matches!(r.method, RecordMethod::FamilyReported | RecordMethod::Caregiver))
            .count();
        let supported = cultural
            .family_influence
            .as_ref()
            .map_or(0, |f| f.supported_records);
        let social_support =
            ratio(family_reported, relevant_count).max(ratio(supported, relevant_count));

        Ok(FeatureVector {
            historical_adherence,
            recent_trend,
            streak_length,
            missed_dose_frequency,
            delay_pattern,
            day_of_week_effect,
            time_of_day_effect,
            medication_complexity: medication.complexity(),
            cultural_factors: cultural.cultural_exposure(),
            seasonal_effect: cultural.worst_festival_drop() / 100.0,
            health_status_stability,
            social_support,
        }
        .clamped())
    }

    /// Taken share per local date, in percent.
    fn daily_rates(&self, relevant: &[&AdherenceRecord]) -> BTreeMap<NaiveDate, f64> {
        let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
        for r in relevant {
            let day = days
                .entry(time::local_date(r.scheduled_time, self.offset))
                .or_default();
            day.0 += usize::from(r.status.is_dose_taken());
            day.1 += 1;
        }
        days.into_iter()
            .map(|(date, (taken, total))| (date, ratio(taken, total) * 100.0))
            .collect()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::from_config(&AdherenceConfig::default())
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// (max − min) of bucket rates, scaled to [0, 1]. Needs two buckets.
fn spread(rates: impl Iterator<Item = f64>) -> f64 {
    let rates: Vec<f64> = rates.collect();
    if rates.len() < 2 {
        return 0.0;
    }
    let high = rates.iter().copied().fold(f64::MIN, f64::max);
    let low = rates.iter().copied().fold(f64::MAX, f64::min);
    (high - low) / 100.0
}

/// Last 7 days vs the 7 before, anchored on the latest date.
/// 0.5 is flat; each point of swing moves the value by 1/200.
fn recent_trend(daily: &BTreeMap<NaiveDate, f64>) -> f64 {
    let Some(anchor) = daily.keys().next_back().copied() else {
        return 0.5;
    };
    let window = |from: NaiveDate, to: NaiveDate| -> Vec<f64> {
        daily.range(from..to).map(|(_, rate)| *rate).collect()
    };
    let recent = window(anchor - Duration::days(TREND_WINDOW_DAYS - 1), anchor + Duration::days(1));
    let prior = window(
        anchor - Duration::days(2 * TREND_WINDOW_DAYS - 1),
        anchor - Duration::days(TREND_WINDOW_DAYS - 1),
    );
    if recent.is_empty() || prior.is_empty() {
        return 0.5;
    }
    0.5 + (recent.iter().mean() - prior.iter().mean()) / 200.0
}

/// 1 − (std dev of daily rates / 50). A single day counts as fully stable.
fn stability(daily: &BTreeMap<NaiveDate, f64>) -> f64 {
    if daily.len() < 2 {
        return 1.0;
    }
    let deviation = daily.values().std_dev();
    if deviation.is_nan() {
        return 1.0;
    }
    1.0 - deviation / STABILITY_SATURATION_POINTS
}
