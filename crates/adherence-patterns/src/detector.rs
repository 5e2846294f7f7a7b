//! Fixed battery of behavioral pattern tests.
//!
//! Each test is independent. Below its minimum sample a test emits nothing;
//! insufficient data is never an error.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, Weekday};
use statrs::statistics::Statistics;

use adherence_core::config::{AdherenceConfig, PatternConfig};
use adherence_core::math;
use adherence_core::models::{
    AdherencePattern, AdherenceRecord, AdherenceStatus, PatternImpact, PatternType, TimeSlot,
};
use adherence_core::time;
use adherence_observability::events;
use adherence_scoring::consistency::consistency_report;

use crate::recommendations;

#[derive(Debug, Clone)]
pub struct PatternDetector {
    config: PatternConfig,
    offset: FixedOffset,
}

impl PatternDetector {
    pub fn new(config: PatternConfig, offset: FixedOffset) -> Self {
        Self { config, offset }
    }

    pub fn from_config(config: &AdherenceConfig) -> Self {
        Self::new(config.patterns.clone(), config.timezone.offset())
    }

    /// Run every test and return the patterns found, most confident first.
    pub fn detect(&self, records: &[AdherenceRecord]) -> Vec<AdherencePattern> {
        let relevant: Vec<&AdherenceRecord> = records
            .iter()
            .filter(|r| r.status.counts_toward_rate())
            .collect();

        let mut patterns = Vec::new();
        patterns.extend(self.time_slot_patterns(&relevant));
        patterns.extend(self.weekend_decline(&relevant));
        patterns.extend(self.prayer_time_conflict(&relevant));
        patterns.extend(self.fasting_adjustment(&relevant));
        patterns.extend(self.trend(&relevant));

        patterns.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then(a.pattern_type.cmp(&b.pattern_type))
        });

        for p in &patterns {
            events::pattern_detected(p.pattern_type.as_str(), p.confidence, p.occurrences);
        }
        patterns
    }

    fn confidence(&self, sample: usize) -> f64 {
        (sample as f64 / self.config.target_sample_size as f64).min(1.0)
    }

    fn pattern(
        &self,
        pattern_type: PatternType,
        impact: PatternImpact,
        description: String,
        sample: usize,
        metric: f64,
        contributing: &[&AdherenceRecord],
    ) -> AdherencePattern {
        AdherencePattern {
            pattern_type,
            impact,
            description,
            confidence: self.confidence(sample),
            occurrences: sample,
            metric,
            affected_medications: medications(contributing),
            recommendations: recommendations::owned(pattern_type),
            cultural_factors: Vec::new(),
        }
    }

    fn time_slot_patterns(&self, relevant: &[&AdherenceRecord]) -> Vec<AdherencePattern> {
        let owned: Vec<AdherenceRecord> = relevant.iter().map(|r| (*r).clone()).collect();
        let report = consistency_report(&owned, self.offset);
        let in_slot = |slot: TimeSlot| -> Vec<&AdherenceRecord> {
            relevant
                .iter()
                .copied()
                .filter(|r| TimeSlot::from_hour(time::local_hour(r.scheduled_time, self.offset)) == slot)
                .collect()
        };

        let mut out = Vec::new();
        if let Some(morning) = report.slot(TimeSlot::Morning) {
            if morning.records >= self.config.min_bucket_sample
                && morning.adherence_rate >= self.config.morning_consistency_threshold
            {
                out.push(self.pattern(
                    PatternType::MorningConsistency,
                    PatternImpact::Positive,
                    format!(
                        "Morning doses are taken consistently ({:.1}% of {} doses)",
                        morning.adherence_rate, morning.records
                    ),
                    morning.records,
                    morning.adherence_rate,
                    &in_slot(TimeSlot::Morning),
                ));
            }
        }
        if let Some(evening) = report.slot(TimeSlot::Evening) {
            if evening.records >= self.config.min_bucket_sample
                && evening.miss_rate >= self.config.evening_miss_threshold
            {
                out.push(self.pattern(
                    PatternType::EveningMissed,
                    PatternImpact::Negative,
                    format!(
                        "Evening doses are often missed ({:.1}% of {} doses)",
                        evening.miss_rate, evening.records
                    ),
                    evening.records,
                    evening.miss_rate,
                    &in_slot(TimeSlot::Evening),
                ));
            }
        }
        out
    }

    fn weekend_decline(&self, relevant: &[&AdherenceRecord]) -> Option<AdherencePattern> {
        if relevant.len() < self.config.weekend_min_records {
            return None;
        }
        let (weekend, weekday): (Vec<&AdherenceRecord>, Vec<&AdherenceRecord>) =
            relevant.iter().copied().partition(|r| {
                matches!(
                    time::local_date(r.scheduled_time, self.offset).weekday(),
                    Weekday::Sat | Weekday::Sun
                )
            });
        if weekend.is_empty() || weekday.is_empty() {
            return None;
        }
        let weekday_rate = taken_rate(&weekday);
        let weekend_rate = taken_rate(&weekend);
        let gap = math::round1(weekday_rate - weekend_rate);
        if gap < self.config.weekend_decline_margin {
            return None;
        }
        Some(self.pattern(
            PatternType::WeekendDecline,
            PatternImpact::Negative,
            format!(
                "Weekend adherence ({weekend_rate:.1}%) trails weekdays ({weekday_rate:.1}%) by {gap:.1} points"
            ),
            relevant.len(),
            gap,
            &weekend,
        ))
    }

    fn prayer_time_conflict(&self, relevant: &[&AdherenceRecord]) -> Option<AdherencePattern> {
        let adjusted: Vec<&AdherenceRecord> = relevant
            .iter()
            .copied()
            .filter(|r| r.status == AdherenceStatus::Adjusted && r.during_prayer())
            .collect();
        if adjusted.len() < self.config.prayer_conflict_min_occurrences {
            return None;
        }
        let mut p = self.pattern(
            PatternType::PrayerTimeConflict,
            PatternImpact::Neutral,
            format!(
                "{} doses were rescheduled around prayer times",
                adjusted.len()
            ),
            adjusted.len(),
            adjusted.len() as f64,
            &adjusted,
        );
        p.cultural_factors = vec!["prayer_times".to_string()];
        Some(p)
    }

    fn fasting_adjustment(&self, relevant: &[&AdherenceRecord]) -> Option<AdherencePattern> {
        let flagged: Vec<&AdherenceRecord> = relevant
            .iter()
            .copied()
            .filter(|r| r.during_fasting())
            .collect();
        if flagged.len() < self.config.fasting_min_records {
            return None;
        }
        let overall = taken_rate(relevant);
        let fasting = taken_rate(&flagged);
        let trails = overall - fasting >= self.config.fasting_margin;
        let (impact, description) = if trails {
            (
                PatternImpact::Negative,
                format!("Adherence while fasting ({fasting:.1}%) trails the overall rate ({overall:.1}%)"),
            )
        } else {
            (
                PatternImpact::Neutral,
                format!("Dose timing adapts to fasting periods ({fasting:.1}% while fasting)"),
            )
        };
        let mut p = self.pattern(
            PatternType::FastingAdjustment,
            impact,
            description,
            flagged.len(),
            fasting,
            &flagged,
        );
        p.cultural_factors = vec!["fasting".to_string()];
        Some(p)
    }

    /// Mean daily rate over the last window against the window before it,
    /// anchored on the latest record's local date.
    fn trend(&self, relevant: &[&AdherenceRecord]) -> Option<AdherencePattern> {
        if relevant.len() < self.config.trend_min_records {
            return None;
        }
        let mut by_day: BTreeMap<NaiveDate, Vec<&AdherenceRecord>> = BTreeMap::new();
        for r in relevant {
            by_day
                .entry(time::local_date(r.scheduled_time, self.offset))
                .or_default()
                .push(r);
        }
        let anchor = *by_day.keys().next_back()?;
        let window = Duration::days(self.config.trend_window_days);
        let recent_start = anchor - window;
        let previous_start = recent_start - window;

        let mut recent = Vec::new();
        let mut previous = Vec::new();
        let mut contributing = Vec::new();
        for (day, day_records) in &by_day {
            let rate = taken_rate(day_records);
            if *day > recent_start {
                recent.push(rate);
            } else if *day > previous_start {
                previous.push(rate);
            } else {
                continue;
            }
            contributing.extend(day_records.iter().copied());
        }
        if recent.is_empty() || previous.is_empty() {
            return None;
        }

        let swing = math::round1(recent.iter().mean() - previous.iter().mean());
        let (pattern_type, impact, direction) = if swing >= self.config.trend_margin {
            (PatternType::ImprovingTrend, PatternImpact::Positive, "improved")
        } else if swing <= -self.config.trend_margin {
            (PatternType::DecliningTrend, PatternImpact::Negative, "declined")
        } else {
            return None;
        };
        Some(self.pattern(
            pattern_type,
            impact,
            format!(
                "Daily adherence {direction} by {:.1} points over the last {} days",
                swing.abs(),
                self.config.trend_window_days
            ),
            contributing.len(),
            swing,
            &contributing,
        ))
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::from_config(&AdherenceConfig::default())
    }
}

/// Share of records where the dose was taken (adjusted included), in percent.
pub(crate) fn taken_rate(records: &[&AdherenceRecord]) -> f64 {
    let taken = records.iter().filter(|r| r.status.is_dose_taken()).count();
    math::percent(taken, records.len())
}

fn medications(records: &[&AdherenceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.medication_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
