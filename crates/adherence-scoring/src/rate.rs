//! Weighted period adherence rate.

use adherence_core::config::RateConfig;
use adherence_core::constants::MINUTES_PER_HOUR;
use adherence_core::errors::RecordError;
use adherence_core::math;
use adherence_core::models::{AdherenceRecord, AdherenceStatus};

/// Computes `Σ weight / relevant × 100` over a set of records.
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    config: RateConfig,
}

impl RateCalculator {
    pub fn new(config: RateConfig) -> Self {
        Self { config }
    }

    /// Weight a single record contributes, or `None` when the record does not
    /// count toward the rate at all (pending, skipped).
    pub fn dose_weight(&self, record: &AdherenceRecord) -> Result<Option<f64>, RecordError> {
        if !record.status.counts_toward_rate() {
            return Ok(None);
        }
        record.validate()?;

        let c = &self.config;
        let weight = match record.status {
            AdherenceStatus::TakenOnTime => 1.0,
            AdherenceStatus::TakenEarly => c.early_weight,
            AdherenceStatus::Adjusted => c.adjusted_weight,
            AdherenceStatus::Missed => 0.0,
            AdherenceStatus::TakenLate => {
                let delay_hours =
                    record.deviation_minutes().unwrap_or(0).max(0) as f64 / MINUTES_PER_HOUR;
                self.late_weight(delay_hours)
            }
            AdherenceStatus::Skipped | AdherenceStatus::Pending => return Ok(None),
        };
        Ok(Some(weight))
    }

    /// Graduated weight for a late dose.
    pub fn late_weight(&self, delay_hours: f64) -> f64 {
        let c = &self.config;
        if delay_hours <= c.late_window_hours {
            (1.0 - delay_hours / (2.0 * c.late_window_hours)).max(c.late_floor_weight)
        } else {
            c.beyond_window_weight
        }
    }

    /// Weighted rate in percent, one decimal. Empty or all-excluded input is 0.
    pub fn calculate(&self, records: &[AdherenceRecord]) -> Result<f64, RecordError> {
        let mut weights = Vec::with_capacity(records.len());
        for record in records {
            if let Some(w) = self.dose_weight(record)? {
                weights.push(w);
            }
        }
        if weights.is_empty() {
            return Ok(0.0);
        }
        let relevant = weights.len() as f64;
        let total = math::stable_sum(&mut weights);
        let rate = math::round1(total / relevant * 100.0);
        tracing::debug!(relevant = weights.len(), rate, "adherence rate computed");
        Ok(rate)
    }

    /// Unweighted share of relevant records where the dose was taken, in percent.
    pub fn simple_rate(records: &[AdherenceRecord]) -> f64 {
        let relevant = records
            .iter()
            .filter(|r| r.status.counts_toward_rate())
            .count();
        let taken = records.iter().filter(|r| r.status.is_dose_taken()).count();
        math::percent(taken, relevant)
    }
}
