use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::FEATURE_COUNT;
use crate::errors::ModelError;

/// Names of the 12 model features, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    HistoricalAdherence,
    RecentTrend,
    StreakLength,
    MissedDoseFrequency,
    DelayPattern,
    DayOfWeekEffect,
    TimeOfDayEffect,
    MedicationComplexity,
    CulturalFactors,
    SeasonalEffect,
    HealthStatusStability,
    SocialSupport,
}

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        Self::HistoricalAdherence,
        Self::RecentTrend,
        Self::StreakLength,
        Self::MissedDoseFrequency,
        Self::DelayPattern,
        Self::DayOfWeekEffect,
        Self::TimeOfDayEffect,
        Self::MedicationComplexity,
        Self::CulturalFactors,
        Self::SeasonalEffect,
        Self::HealthStatusStability,
        Self::SocialSupport,
    ];

    /// Human-readable label used in factor descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Self::HistoricalAdherence => "Historical adherence",
            Self::RecentTrend => "Recent trend",
            Self::StreakLength => "Streak length",
            Self::MissedDoseFrequency => "Missed-dose frequency",
            Self::DelayPattern => "Dose timing delays",
            Self::DayOfWeekEffect => "Day-of-week variation",
            Self::TimeOfDayEffect => "Time-of-day variation",
            Self::MedicationComplexity => "Medication complexity",
            Self::CulturalFactors => "Cultural schedule factors",
            Self::SeasonalEffect => "Festival season effect",
            Self::HealthStatusStability => "Routine stability",
            Self::SocialSupport => "Family and social support",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HistoricalAdherence => "historical_adherence",
            Self::RecentTrend => "recent_trend",
            Self::StreakLength => "streak_length",
            Self::MissedDoseFrequency => "missed_dose_frequency",
            Self::DelayPattern => "delay_pattern",
            Self::DayOfWeekEffect => "day_of_week_effect",
            Self::TimeOfDayEffect => "time_of_day_effect",
            Self::MedicationComplexity => "medication_complexity",
            Self::CulturalFactors => "cultural_factors",
            Self::SeasonalEffect => "seasonal_effect",
            Self::HealthStatusStability => "health_status_stability",
            Self::SocialSupport => "social_support",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed 12-dimension summary of a patient-medication history. Every value is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub historical_adherence: f64,
    /// 0.5 is flat; above improving, below declining.
    pub recent_trend: f64,
    pub streak_length: f64,
    pub missed_dose_frequency: f64,
    pub delay_pattern: f64,
    pub day_of_week_effect: f64,
    pub time_of_day_effect: f64,
    pub medication_complexity: f64,
    pub cultural_factors: f64,
    pub seasonal_effect: f64,
    pub health_status_stability: f64,
    pub social_support: f64,
}

impl FeatureVector {
    /// Values in `FeatureName::ALL` order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.historical_adherence,
            self.recent_trend,
            self.streak_length,
            self.missed_dose_frequency,
            self.delay_pattern,
            self.day_of_week_effect,
            self.time_of_day_effect,
            self.medication_complexity,
            self.cultural_factors,
            self.seasonal_effect,
            self.health_status_stability,
            self.social_support,
        ]
    }

    /// Build from values in `FeatureName::ALL` order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            historical_adherence: values[0],
            recent_trend: values[1],
            streak_length: values[2],
            missed_dose_frequency: values[3],
            delay_pattern: values[4],
            day_of_week_effect: values[5],
            time_of_day_effect: values[6],
            medication_complexity: values[7],
            cultural_factors: values[8],
            seasonal_effect: values[9],
            health_status_stability: values[10],
            social_support: values[11],
        }
    }

    /// Clamp every value into [0, 1]; NaN becomes 0.
    pub fn clamped(&self) -> Self {
        let mut values = self.to_array();
        for v in values.iter_mut() {
            *v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        }
        Self::from_array(values)
    }

    /// Reject NaN, infinite, or out-of-range values.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in FeatureName::ALL.iter().zip(self.to_array()) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidFeatureVector {
                    feature: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order_matches_names() {
        let mut values = [0.0; FEATURE_COUNT];
        values[3] = 0.7;
        let v = FeatureVector::from_array(values);
        assert_eq!(v.missed_dose_frequency, 0.7);
        assert_eq!(FeatureName::ALL[3], FeatureName::MissedDoseFrequency);
        assert_eq!(v.to_array(), values);
    }

    #[test]
    fn nan_is_rejected() {
        let v = FeatureVector {
            recent_trend: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            v.validate(),
            Err(ModelError::InvalidFeatureVector { feature, .. }) if feature == "recent_trend"
        ));
    }

    #[test]
    fn clamped_repairs_out_of_range() {
        let v = FeatureVector {
            historical_adherence: 1.4,
            delay_pattern: -0.2,
            social_support: f64::NAN,
            ..Default::default()
        }
        .clamped();
        assert!(v.validate().is_ok());
        assert_eq!(v.historical_adherence, 1.0);
        assert_eq!(v.delay_pattern, 0.0);
        assert_eq!(v.social_support, 0.0);
    }
}
