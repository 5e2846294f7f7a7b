use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of detected pattern. Recommendations are keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    MorningConsistency,
    EveningMissed,
    WeekendDecline,
    PrayerTimeConflict,
    FastingAdjustment,
    ImprovingTrend,
    DecliningTrend,
    PrayerTimeImpact,
    FestivalDisruption,
    FamilySupportEffect,
}

impl PatternType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MorningConsistency => "morning_consistency",
            Self::EveningMissed => "evening_missed",
            Self::WeekendDecline => "weekend_decline",
            Self::PrayerTimeConflict => "prayer_time_conflict",
            Self::FastingAdjustment => "fasting_adjustment",
            Self::ImprovingTrend => "improving_trend",
            Self::DecliningTrend => "declining_trend",
            Self::PrayerTimeImpact => "prayer_time_impact",
            Self::FestivalDisruption => "festival_disruption",
            Self::FamilySupportEffect => "family_support_effect",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a pattern's association with adherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternImpact {
    Positive,
    Negative,
    Neutral,
}

/// A detected behavioral or cultural pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherencePattern {
    pub pattern_type: PatternType,
    pub impact: PatternImpact,
    pub description: String,
    /// In [0, 1]: `min(1, sample / target_sample)`.
    pub confidence: f64,
    pub occurrences: usize,
    /// Sub-rate or point delta that triggered the pattern.
    pub metric: f64,
    pub affected_medications: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub cultural_factors: Vec<String>,
}
