//! Per-dose scoring.
//!
//! ```text
//! score = min(100, band(|taken − scheduled|) + prayer + fasting + reminder)
//! ```
//!
//! Band edges are inclusive on the lenient side: a dose exactly 15 minutes
//! off is still on time, exactly 120 minutes late still scores 70.

use adherence_core::config::ScoringConfig;
use adherence_core::constants::MAX_DOSE_SCORE;
use adherence_core::errors::RecordError;
use adherence_core::models::AdherenceRecord;
use adherence_core::time;
use adherence_observability::events;

/// Each component of a dose score, for debugging and audit.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseScoreBreakdown {
    /// Signed deviation in minutes; `None` for missed/skipped/pending.
    pub deviation_minutes: Option<i64>,
    pub base: u8,
    pub cultural_bonus: u8,
    pub reminder_bonus: u8,
    pub final_score: u8,
}

impl DoseScoreBreakdown {
    fn zero() -> Self {
        Self {
            deviation_minutes: None,
            base: 0,
            cultural_bonus: 0,
            reminder_bonus: 0,
            final_score: 0,
        }
    }
}

/// Deterministic dose scorer.
#[derive(Debug, Clone, Default)]
pub struct DoseScorer {
    config: ScoringConfig,
}

impl DoseScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one dose. Taken-state records without a taken time are rejected.
    pub fn score(&self, record: &AdherenceRecord) -> Result<u8, RecordError> {
        self.breakdown(record).map(|b| b.final_score)
    }

    /// Score one dose with each component exposed.
    pub fn breakdown(&self, record: &AdherenceRecord) -> Result<DoseScoreBreakdown, RecordError> {
        if record.status.is_unresolved_or_missed() {
            return Ok(DoseScoreBreakdown::zero());
        }

        let taken = match record.taken_time {
            Some(t) => t,
            None => {
                let err = RecordError::MissingTakenTime {
                    record_id: record.id.clone(),
                    status: record.status.to_string(),
                };
                events::record_rejected(
                    &record.id,
                    &record.patient_id,
                    &record.medication_id,
                    "scoring",
                    &err.to_string(),
                );
                return Err(err);
            }
        };

        let deviation = time::minutes_between(record.scheduled_time, taken);
        let base = self.band(deviation);

        let mut cultural_bonus = 0u8;
        if record.during_prayer() {
            cultural_bonus += self.config.prayer_bonus;
        }
        if record.during_fasting() {
            cultural_bonus += self.config.fasting_bonus;
        }

        let reminder_bonus = match record.reminder_sent_at {
            Some(sent) => {
                let response = time::minutes_between(sent, taken);
                if (0..=self.config.reminder_response_minutes).contains(&response) {
                    self.config.reminder_bonus
                } else {
                    0
                }
            }
            None => 0,
        };

        let raw = f64::from(base) + f64::from(cultural_bonus) + f64::from(reminder_bonus);
        let final_score = raw.min(f64::from(MAX_DOSE_SCORE)).round() as u8;

        tracing::trace!(
            record_id = %record.id,
            deviation,
            base,
            final_score,
            "dose scored"
        );

        Ok(DoseScoreBreakdown {
            deviation_minutes: Some(deviation),
            base,
            cultural_bonus,
            reminder_bonus,
            final_score,
        })
    }

    /// Timing band for a signed deviation. Early and late doses share the bands.
    pub fn band(&self, deviation_minutes: i64) -> u8 {
        let c = &self.config;
        let off = deviation_minutes.abs();
        if off <= c.on_time_window_minutes {
            100
        } else if off <= c.slight_deviation_minutes {
            95
        } else if off <= c.moderate_deviation_minutes {
            85
        } else if off <= c.late_threshold_minutes {
            70
        } else {
            50
        }
    }

    /// Return a copy of the record with its cached score recomputed.
    /// Missed/skipped/pending records always carry 0.
    pub fn rescore(&self, record: &AdherenceRecord) -> Result<AdherenceRecord, RecordError> {
        let mut scored = record.clone();
        scored.adherence_score = self.score(record)?;
        Ok(scored)
    }
}
