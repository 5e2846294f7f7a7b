//! Adherence summary over a record set.

use chrono::{DateTime, FixedOffset, Utc};

use adherence_core::config::AdherenceConfig;
use adherence_core::errors::RecordError;
use adherence_core::math;
use adherence_core::models::{AdherenceMetrics, AdherencePeriod, AdherenceRecord, AdherenceStatus};

use crate::consistency::consistency_report;
use crate::rate::RateCalculator;
use crate::scorer::DoseScorer;

/// Records whose scheduled time falls in `[start, end)`.
pub fn filter_period(
    records: &[AdherenceRecord],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<AdherenceRecord> {
    let period = AdherencePeriod::new(start, end);
    records
        .iter()
        .filter(|r| period.contains(r.scheduled_time))
        .cloned()
        .collect()
}

/// Combines the scorer, rate calculator and consistency buckets into one summary.
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    scorer: DoseScorer,
    rate: RateCalculator,
    offset: FixedOffset,
}

impl MetricsCalculator {
    pub fn new(scorer: DoseScorer, rate: RateCalculator, offset: FixedOffset) -> Self {
        Self {
            scorer,
            rate,
            offset,
        }
    }

    pub fn from_config(config: &AdherenceConfig) -> Self {
        Self::new(
            DoseScorer::new(config.scoring.clone()),
            RateCalculator::new(config.rate.clone()),
            config.timezone.offset(),
        )
    }

    /// Summarise `records`. When `period` is given only records scheduled
    /// inside it are considered.
    pub fn summarize(
        &self,
        records: &[AdherenceRecord],
        period: Option<AdherencePeriod>,
    ) -> Result<AdherenceMetrics, RecordError> {
        let scoped: Vec<AdherenceRecord> = match period {
            Some(p) => filter_period(records, p.start, p.end),
            None => records.to_vec(),
        };

        let mut metrics = AdherenceMetrics {
            total_records: scoped.len(),
            period,
            ..Default::default()
        };

        let mut delays = Vec::new();
        let mut scores = Vec::new();
        for record in &scoped {
            match record.status {
                AdherenceStatus::TakenOnTime => metrics.taken_on_time += 1,
                AdherenceStatus::TakenLate => metrics.taken_late += 1,
                AdherenceStatus::TakenEarly => metrics.taken_early += 1,
                AdherenceStatus::Adjusted => metrics.adjusted += 1,
                AdherenceStatus::Missed => metrics.missed += 1,
                AdherenceStatus::Skipped => metrics.skipped += 1,
                AdherenceStatus::Pending => metrics.pending += 1,
            }
            if !record.status.counts_toward_rate() {
                continue;
            }
            scores.push(f64::from(self.scorer.score(record)?));
            if record.status.is_dose_taken() {
                if let Some(d) = record.deviation_minutes() {
                    delays.push(d.unsigned_abs() as f64);
                }
            }
        }

        metrics.relevant_records = scores.len();
        metrics.simple_rate = RateCalculator::simple_rate(&scoped);
        metrics.weighted_rate = self.rate.calculate(&scoped)?;
        metrics.average_delay_minutes = mean(&mut delays);
        metrics.average_dose_score = mean(&mut scores);
        metrics.consistency = consistency_report(&scoped, self.offset);
        Ok(metrics)
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::from_config(&AdherenceConfig::default())
    }
}

fn mean(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    math::round1(math::stable_sum(values) / n)
}
