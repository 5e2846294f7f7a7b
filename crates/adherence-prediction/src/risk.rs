//! Risk tiers and confidence.

use adherence_core::config::PredictionConfig;
use adherence_core::models::{RiskLevel, Timeframe};

/// Inclusive lower bounds: ≥ 0.80 low, ≥ 0.60 medium, ≥ 0.40 high, else critical.
pub fn classify(score: f64) -> RiskLevel {
    if score >= 0.80 {
        RiskLevel::Low
    } else if score >= 0.60 {
        RiskLevel::Medium
    } else if score >= 0.40 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

/// `min(records / full, cap) × timeframe multiplier`.
pub fn confidence(record_count: usize, timeframe: Timeframe, config: &PredictionConfig) -> f64 {
    let full = config.full_confidence_records.max(1) as f64;
    let volume = (record_count as f64 / full).min(config.confidence_cap);
    volume * timeframe.confidence_multiplier()
}

/// Timeframe blend of the model score and historical adherence.
pub fn blended_score(model_score: f64, historical_adherence: f64, timeframe: Timeframe) -> f64 {
    let w = timeframe.model_weight();
    (w * model_score + (1.0 - w) * historical_adherence).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(classify(0.80), RiskLevel::Low);
        assert_eq!(classify(0.7999), RiskLevel::Medium);
        assert_eq!(classify(0.60), RiskLevel::Medium);
        assert_eq!(classify(0.40), RiskLevel::High);
        assert_eq!(classify(0.3999), RiskLevel::Critical);
        assert_eq!(classify(0.0), RiskLevel::Critical);
    }

    #[test]
    fn confidence_is_capped_then_scaled() {
        let config = PredictionConfig::default();
        assert_eq!(confidence(50, Timeframe::NextDose, &config), 0.5);
        assert_eq!(confidence(500, Timeframe::NextDose, &config), 0.8);
        assert!((confidence(500, Timeframe::NextMonth, &config) - 0.4).abs() < 1e-12);
        assert_eq!(confidence(0, Timeframe::Next24h, &config), 0.0);
    }

    #[test]
    fn next_dose_uses_model_only() {
        assert_eq!(blended_score(0.42, 0.9, Timeframe::NextDose), 0.42);
        assert!((blended_score(0.5, 1.0, Timeframe::NextMonth) - 0.65).abs() < 1e-12);
    }
}
