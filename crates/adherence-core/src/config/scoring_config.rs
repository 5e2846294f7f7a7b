use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-dose scoring bands and bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Deviation (minutes, inclusive) still scored as on time.
    pub on_time_window_minutes: i64,
    /// Upper bound (inclusive) of the 95-point band.
    pub slight_deviation_minutes: i64,
    /// Upper bound (inclusive) of the 85-point band.
    pub moderate_deviation_minutes: i64,
    /// Upper bound (inclusive) of the 70-point band; beyond scores 50.
    pub late_threshold_minutes: i64,
    /// Bonus for doses flagged as taken during prayer.
    pub prayer_bonus: u8,
    /// Bonus for doses flagged as taken while fasting.
    pub fasting_bonus: u8,
    /// Bonus for responding to a reminder promptly.
    pub reminder_bonus: u8,
    /// Response window (minutes, inclusive) for the reminder bonus.
    pub reminder_response_minutes: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            on_time_window_minutes: defaults::DEFAULT_ON_TIME_WINDOW_MINUTES,
            slight_deviation_minutes: defaults::DEFAULT_SLIGHT_DEVIATION_MINUTES,
            moderate_deviation_minutes: defaults::DEFAULT_MODERATE_DEVIATION_MINUTES,
            late_threshold_minutes: defaults::DEFAULT_LATE_THRESHOLD_MINUTES,
            prayer_bonus: defaults::DEFAULT_PRAYER_BONUS,
            fasting_bonus: defaults::DEFAULT_FASTING_BONUS,
            reminder_bonus: defaults::DEFAULT_REMINDER_BONUS,
            reminder_response_minutes: defaults::DEFAULT_REMINDER_RESPONSE_MINUTES,
        }
    }
}

/// Weights used by the period adherence rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Late-dose window in hours. Delays inside it degrade gradually.
    pub late_window_hours: f64,
    /// Weight of an early dose. Applied regardless of how early.
    pub early_weight: f64,
    /// Weight of a culturally adjusted dose.
    pub adjusted_weight: f64,
    /// Minimum weight of a late dose inside the window.
    pub late_floor_weight: f64,
    /// Weight of a late dose beyond the window.
    pub beyond_window_weight: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            late_window_hours: defaults::DEFAULT_LATE_WINDOW_HOURS,
            early_weight: defaults::DEFAULT_EARLY_WEIGHT,
            adjusted_weight: defaults::DEFAULT_ADJUSTED_WEIGHT,
            late_floor_weight: defaults::DEFAULT_LATE_FLOOR_WEIGHT,
            beyond_window_weight: defaults::DEFAULT_BEYOND_WINDOW_WEIGHT,
        }
    }
}
