//! Top-level adherence configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CacheConfig, CulturalConfig, ObservabilityConfig, PatternConfig, PredictionConfig,
    RateConfig, ScoringConfig, StreakConfig, TimezoneConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ADHERENCE_*`)
/// 2. Config file (TOML, path supplied by the host)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdherenceConfig {
    pub timezone: TimezoneConfig,
    pub scoring: ScoringConfig,
    pub rate: RateConfig,
    pub streak: StreakConfig,
    pub patterns: PatternConfig,
    pub cultural: CulturalConfig,
    pub prediction: PredictionConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl AdherenceConfig {
    /// Load configuration: defaults, then the optional TOML file, then env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-720..=840).contains(&self.timezone.utc_offset_minutes) {
            return Err(invalid(
                "timezone.utc_offset_minutes",
                "must be between -720 and 840",
            ));
        }

        let s = &self.scoring;
        if !(0 < s.on_time_window_minutes
            && s.on_time_window_minutes <= s.slight_deviation_minutes
            && s.slight_deviation_minutes <= s.moderate_deviation_minutes
            && s.moderate_deviation_minutes <= s.late_threshold_minutes)
        {
            return Err(invalid(
                "scoring",
                "deviation bands must be positive and non-decreasing",
            ));
        }

        let r = &self.rate;
        if r.late_window_hours <= 0.0 || !r.late_window_hours.is_finite() {
            return Err(invalid("rate.late_window_hours", "must be greater than 0"));
        }
        for (field, weight) in [
            ("rate.early_weight", r.early_weight),
            ("rate.adjusted_weight", r.adjusted_weight),
            ("rate.late_floor_weight", r.late_floor_weight),
            ("rate.beyond_window_weight", r.beyond_window_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(invalid(field, "must be between 0.0 and 1.0"));
            }
        }

        if self.streak.recovery_window_hours < 0 {
            return Err(invalid("streak.recovery_window_hours", "must not be negative"));
        }

        if self.patterns.target_sample_size == 0 {
            return Err(invalid("patterns.target_sample_size", "must be greater than 0"));
        }
        if self.patterns.trend_window_days <= 0 {
            return Err(invalid("patterns.trend_window_days", "must be greater than 0"));
        }

        if !(-90.0..=90.0).contains(&self.cultural.default_latitude) {
            return Err(invalid("cultural.default_latitude", "must be between -90 and 90"));
        }
        if !(-180.0..=180.0).contains(&self.cultural.default_longitude) {
            return Err(invalid(
                "cultural.default_longitude",
                "must be between -180 and 180",
            ));
        }

        let p = &self.prediction;
        if !(p.learning_rate > 0.0 && p.learning_rate <= 1.0) {
            return Err(invalid("prediction.learning_rate", "must be in (0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&p.confidence_cap) {
            return Err(invalid("prediction.confidence_cap", "must be between 0.0 and 1.0"));
        }
        if p.full_confidence_records == 0 {
            return Err(invalid(
                "prediction.full_confidence_records",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `ADHERENCE_UTC_OFFSET_MINUTES`, `ADHERENCE_LEARNING_RATE`, etc.
    fn apply_env_overrides(config: &mut AdherenceConfig) {
        if let Ok(val) = std::env::var("ADHERENCE_UTC_OFFSET_MINUTES") {
            if let Ok(v) = val.parse::<i32>() {
                config.timezone.utc_offset_minutes = v;
            }
        }
        if let Ok(val) = std::env::var("ADHERENCE_LATE_THRESHOLD_MINUTES") {
            if let Ok(v) = val.parse::<i64>() {
                config.scoring.late_threshold_minutes = v;
            }
        }
        if let Ok(val) = std::env::var("ADHERENCE_LATE_WINDOW_HOURS") {
            if let Ok(v) = val.parse::<f64>() {
                config.rate.late_window_hours = v;
            }
        }
        if let Ok(val) = std::env::var("ADHERENCE_RECOVERY_WINDOW_HOURS") {
            if let Ok(v) = val.parse::<i64>() {
                config.streak.recovery_window_hours = v;
            }
        }
        if let Ok(val) = std::env::var("ADHERENCE_LEARNING_RATE") {
            if let Ok(v) = val.parse::<f64>() {
                config.prediction.learning_rate = v;
            }
        }
        if let Ok(val) = std::env::var("ADHERENCE_LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AdherenceConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AdherenceConfig::from_toml(
            r#"
            [streak]
            recovery_window_hours = 48

            [scoring]
            late_threshold_minutes = 180
            "#,
        )
        .unwrap();
        assert_eq!(config.streak.recovery_window_hours, 48);
        assert_eq!(config.scoring.late_threshold_minutes, 180);
        assert_eq!(config.scoring.on_time_window_minutes, 15);
        assert_eq!(config.timezone.utc_offset_minutes, 480);
    }

    #[test]
    fn rejects_inverted_scoring_bands() {
        let err = AdherenceConfig::from_toml(
            r#"
            [scoring]
            slight_deviation_minutes = 90
            moderate_deviation_minutes = 60
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let err = AdherenceConfig::from_toml("[rate]\nearly_weight = 1.5\n").unwrap_err();
        match err {
            ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "rate.early_weight"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AdherenceConfig::from_toml("[streak\nrecovery_window_hours = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn toml_round_trip_preserves_overrides() {
        let mut config = AdherenceConfig::default();
        config.prediction.learning_rate = 0.05;
        let text = config.to_toml().unwrap();
        let parsed = AdherenceConfig::from_toml(&text).unwrap();
        assert!((parsed.prediction.learning_rate - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AdherenceConfig::load(Some(Path::new("/nonexistent/adherence.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
