//! Linear adherence model.
//!
//! ```text
//! score = clamp(bias + Σ weight_i × feature_i, 0, 1)
//! ```

use adherence_core::constants::FEATURE_COUNT;
use adherence_core::models::{FeatureName, FeatureVector};

/// Prior weights in `FeatureName::ALL` order.
const PRIOR_WEIGHTS: [f64; FEATURE_COUNT] = [
    0.35,  // historical adherence
    0.10,  // recent trend
    0.10,  // streak length
    -0.20, // missed-dose frequency
    -0.05, // delay pattern
    -0.05, // day-of-week effect
    -0.05, // time-of-day effect
    -0.05, // medication complexity
    0.02,  // cultural factors
    -0.05, // seasonal effect
    0.05,  // health-status stability
    0.05,  // social support
];

const PRIOR_BIAS: f64 = 0.30;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
    /// Bumped on every applied update.
    pub version: u64,
}

impl LinearModel {
    /// The seeded prior.
    pub fn prior() -> Self {
        Self {
            weights: PRIOR_WEIGHTS,
            bias: PRIOR_BIAS,
            version: 0,
        }
    }

    pub fn weight(&self, feature: FeatureName) -> f64 {
        FeatureName::ALL
            .iter()
            .position(|f| *f == feature)
            .map_or(0.0, |i| self.weights[i])
    }

    pub fn score(&self, features: &FeatureVector) -> f64 {
        let raw = self.bias
            + self
                .weights
                .iter()
                .zip(features.to_array())
                .map(|(w, f)| w * f)
                .sum::<f64>();
        raw.clamp(0.0, 1.0)
    }

    /// Per-feature `weight × value`, in `FeatureName::ALL` order.
    pub fn contributions(&self, features: &FeatureVector) -> Vec<(FeatureName, f64)> {
        FeatureName::ALL
            .iter()
            .zip(self.weights.iter().zip(features.to_array()))
            .map(|(name, (w, f))| (*name, w * f))
            .collect()
    }

    /// One gradient step: `Δw_i = lr × error × f_i`, `Δbias = lr × error`.
    pub(crate) fn apply_gradient(&mut self, error: f64, features: &FeatureVector, learning_rate: f64) {
        for (w, f) in self.weights.iter_mut().zip(features.to_array()) {
            *w += learning_rate * error * f;
        }
        self.bias += learning_rate * error;
        self.version += 1;
    }
}

impl Default for LinearModel {
    fn default() -> Self {
        Self::prior()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prior_score_is_bias_for_zero_features() {
        let model = LinearModel::prior();
        assert!((model.score(&FeatureVector::default()) - 0.30).abs() < 1e-12);
    }

    #[test]
    fn score_is_clamped() {
        let mut model = LinearModel::prior();
        model.bias = 5.0;
        assert_eq!(model.score(&FeatureVector::default()), 1.0);
        model.bias = -5.0;
        assert_eq!(model.score(&FeatureVector::default()), 0.0);
    }

    #[test]
    fn gradient_moves_toward_outcome() {
        let mut model = LinearModel::prior();
        let features = FeatureVector {
            historical_adherence: 1.0,
            ..Default::default()
        };
        let before = model.score(&features);
        model.apply_gradient(1.0 - before, &features, 0.01);
        assert!(model.score(&features) > before);
        assert_eq!(model.version, 1);
        assert!((model.weight(FeatureName::HistoricalAdherence) - (0.35 + 0.01 * (1.0 - before))).abs() < 1e-12);
        // Zero-valued features keep their weights.
        assert_eq!(model.weight(FeatureName::RecentTrend), 0.10);
    }
}
