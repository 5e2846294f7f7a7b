use serde::{Deserialize, Serialize};

use super::defaults;

/// Predictive engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Gradient-descent step size for online model updates.
    pub learning_rate: f64,
    /// Maximum cached feature vectors.
    pub feature_cache_capacity: u64,
    /// Number of contributing factors reported per prediction.
    pub max_factors: usize,
    /// Number of recommendations reported per prediction.
    pub max_recommendations: usize,
    /// Confidence ceiling before the timeframe multiplier.
    pub confidence_cap: f64,
    /// Record count at which data volume stops limiting confidence.
    pub full_confidence_records: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            feature_cache_capacity: defaults::DEFAULT_FEATURE_CACHE_CAPACITY,
            max_factors: defaults::DEFAULT_MAX_FACTORS,
            max_recommendations: defaults::DEFAULT_MAX_RECOMMENDATIONS,
            confidence_cap: defaults::DEFAULT_CONFIDENCE_CAP,
            full_confidence_records: defaults::DEFAULT_FULL_CONFIDENCE_RECORDS,
        }
    }
}
