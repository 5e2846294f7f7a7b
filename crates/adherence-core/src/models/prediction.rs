use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::features::FeatureName;

/// Prediction horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    NextDose,
    Next24h,
    NextWeek,
    NextMonth,
}

impl Timeframe {
    /// All horizons, shortest first.
    pub const ALL: [Timeframe; 4] = [
        Self::NextDose,
        Self::Next24h,
        Self::NextWeek,
        Self::NextMonth,
    ];

    /// Confidence multiplier. Non-increasing with horizon length.
    pub fn confidence_multiplier(self) -> f64 {
        match self {
            Self::NextDose => 1.0,
            Self::Next24h => 0.9,
            Self::NextWeek => 0.7,
            Self::NextMonth => 0.5,
        }
    }

    /// Share of the model score (vs historical adherence) in the horizon's estimate.
    pub fn model_weight(self) -> f64 {
        match self {
            Self::NextDose => 1.0,
            Self::Next24h => 0.9,
            Self::NextWeek => 0.8,
            Self::NextMonth => 0.7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NextDose => "next_dose",
            Self::Next24h => "next_24h",
            Self::NextWeek => "next_week",
            Self::NextMonth => "next_month",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal risk classification. Declared best to worst so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature's contribution to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionFactor {
    pub feature: FeatureName,
    /// `weight × feature value`; sign gives direction.
    pub impact: f64,
    pub description: String,
}

/// Recommendation priority. Declared highest first so sorting ascending puts urgent items first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    Urgent,
    High,
    Medium,
    Low,
}

/// An actionable suggestion from the static recommendation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub category: String,
    pub message: String,
    /// Expected improvement in adherence points.
    pub expected_improvement: f64,
}

/// Forward-looking adherence estimate for one medication and horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherencePrediction {
    pub medication_id: String,
    pub timeframe: Timeframe,
    /// Percentage, one decimal.
    pub predicted_rate: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub factors: Vec<PredictionFactor>,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}
