use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RecordError;
use crate::time;

/// Lifecycle status of one scheduled dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceStatus {
    TakenOnTime,
    TakenLate,
    TakenEarly,
    Missed,
    Skipped,
    Adjusted,
    Pending,
}

impl AdherenceStatus {
    /// All statuses, in declaration order.
    pub const ALL: [AdherenceStatus; 7] = [
        Self::TakenOnTime,
        Self::TakenLate,
        Self::TakenEarly,
        Self::Missed,
        Self::Skipped,
        Self::Adjusted,
        Self::Pending,
    ];

    /// Any `taken_*` variant.
    pub fn is_taken(self) -> bool {
        matches!(self, Self::TakenOnTime | Self::TakenLate | Self::TakenEarly)
    }

    /// Statuses whose dose score is always 0 and which never carry a taken time.
    pub fn is_unresolved_or_missed(self) -> bool {
        matches!(self, Self::Missed | Self::Skipped | Self::Pending)
    }

    /// Statuses that must carry a taken time.
    pub fn requires_taken_time(self) -> bool {
        self.is_taken() || self == Self::Adjusted
    }

    /// Statuses that participate in the period adherence rate (numerator or denominator).
    pub fn counts_toward_rate(self) -> bool {
        matches!(
            self,
            Self::TakenOnTime | Self::TakenLate | Self::TakenEarly | Self::Missed | Self::Adjusted
        )
    }

    /// The dose was taken in some form (including culturally adjusted timing).
    pub fn is_dose_taken(self) -> bool {
        self.requires_taken_time()
    }

    /// Deterministic precedence used to break ties between conflicting statuses.
    /// Higher wins.
    pub fn precedence(self) -> u8 {
        match self {
            Self::TakenOnTime => 6,
            Self::TakenEarly => 5,
            Self::TakenLate => 4,
            Self::Adjusted => 3,
            Self::Skipped => 2,
            Self::Missed => 1,
            Self::Pending => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TakenOnTime => "taken_on_time",
            Self::TakenLate => "taken_late",
            Self::TakenEarly => "taken_early",
            Self::Missed => "missed",
            Self::Skipped => "skipped",
            Self::Adjusted => "adjusted",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for AdherenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the observation was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordMethod {
    #[default]
    Manual,
    FamilyReported,
    Automatic,
    ReminderResponse,
    Caregiver,
    Imported,
}

/// Meal relation of a dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTiming {
    BeforeMeal,
    WithMeal,
    AfterMeal,
    EmptyStomach,
    Sahur,
    Iftar,
}

/// Advisory cultural flags attached by the cultural calendar collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CulturalContext {
    pub is_during_prayer: Option<bool>,
    pub is_during_fasting: Option<bool>,
    pub meal_timing: Option<MealTiming>,
    pub festival_name: Option<String>,
}

impl CulturalContext {
    pub fn during_prayer(&self) -> bool {
        self.is_during_prayer.unwrap_or(false)
    }

    pub fn during_fasting(&self) -> bool {
        self.is_during_fasting.unwrap_or(false)
    }

    /// True when any flag carries a signal.
    pub fn has_signal(&self) -> bool {
        self.during_prayer()
            || self.during_fasting()
            || self.festival_name.is_some()
            || matches!(self.meal_timing, Some(MealTiming::Sahur | MealTiming::Iftar))
    }
}

/// One scheduled dose occurrence, as supplied by the event store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherenceRecord {
    pub id: String,
    pub patient_id: String,
    pub medication_id: String,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub taken_time: Option<DateTime<Utc>>,
    pub status: AdherenceStatus,
    /// Signed deviation `taken - scheduled` in minutes; negative means early.
    #[serde(default)]
    pub delay_minutes: Option<i64>,
    #[serde(default)]
    pub adherence_score: u8,
    #[serde(default)]
    pub method: RecordMethod,
    #[serde(default)]
    pub cultural_context: Option<CulturalContext>,
    #[serde(default)]
    pub reminder_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl AdherenceRecord {
    /// A pending record scheduled at `scheduled_time`.
    pub fn new(
        id: impl Into<String>,
        patient_id: impl Into<String>,
        medication_id: impl Into<String>,
        scheduled_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            medication_id: medication_id.into(),
            scheduled_time,
            taken_time: None,
            status: AdherenceStatus::Pending,
            delay_minutes: None,
            adherence_score: 0,
            method: RecordMethod::Manual,
            cultural_context: None,
            reminder_sent_at: None,
            notes: Vec::new(),
            updated_at: scheduled_time,
        }
    }

    /// Check the record against the status/taken-time contract.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [
            ("id", &self.id),
            ("patient_id", &self.patient_id),
            ("medication_id", &self.medication_id),
        ] {
            if value.trim().is_empty() {
                return Err(RecordError::MissingField {
                    record_id: self.id.clone(),
                    field: field.to_string(),
                });
            }
        }
        if self.status.requires_taken_time() && self.taken_time.is_none() {
            return Err(RecordError::MissingTakenTime {
                record_id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        if self.status.is_unresolved_or_missed() && self.taken_time.is_some() {
            return Err(RecordError::UnexpectedTakenTime {
                record_id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        if self.adherence_score > crate::constants::MAX_DOSE_SCORE {
            return Err(RecordError::ScoreOutOfRange {
                record_id: self.id.clone(),
                score: self.adherence_score,
            });
        }
        Ok(())
    }

    /// Signed deviation in minutes: the stored value, else derived from the instants.
    pub fn deviation_minutes(&self) -> Option<i64> {
        self.delay_minutes.or_else(|| {
            self.taken_time
                .map(|taken| time::minutes_between(self.scheduled_time, taken))
        })
    }

    /// Cultural flags, or the empty context.
    pub fn cultural(&self) -> CulturalContext {
        self.cultural_context.clone().unwrap_or_default()
    }

    pub fn during_prayer(&self) -> bool {
        self.cultural_context
            .as_ref()
            .is_some_and(CulturalContext::during_prayer)
    }

    pub fn during_fasting(&self) -> bool {
        self.cultural_context
            .as_ref()
            .is_some_and(CulturalContext::during_fasting)
    }
}
