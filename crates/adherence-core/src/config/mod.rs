//! Configuration for the adherence engine.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod adherence_config;
pub mod cache_config;
pub mod cultural_config;
pub mod defaults;
pub mod observability_config;
pub mod pattern_config;
pub mod prediction_config;
pub mod scoring_config;
pub mod streak_config;
pub mod timezone_config;

pub use adherence_config::AdherenceConfig;
pub use cache_config::CacheConfig;
pub use cultural_config::{CulturalConfig, PrayerWindow, PrayerWindows};
pub use observability_config::ObservabilityConfig;
pub use pattern_config::PatternConfig;
pub use prediction_config::PredictionConfig;
pub use scoring_config::{RateConfig, ScoringConfig};
pub use streak_config::StreakConfig;
pub use timezone_config::TimezoneConfig;
