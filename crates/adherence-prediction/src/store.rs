//! Owned, lock-guarded model state shared by prediction and online updates.

use std::sync::RwLock;

use adherence_core::config::PredictionConfig;
use adherence_core::errors::ModelError;
use adherence_core::models::FeatureVector;
use adherence_observability::events;

use crate::cache::FeatureCache;
use crate::model::LinearModel;

/// Weights, bias, and version behind an `RwLock`, plus the feature cache.
///
/// Updates take the write lock, so they are serialized. The version bump and
/// cache invalidation happen before the guard is released: a reader either
/// sees the old model with its cached vectors or the new model with an empty
/// cache.
pub struct ModelStore {
    model: RwLock<LinearModel>,
    features: FeatureCache,
    learning_rate: f64,
}

impl ModelStore {
    pub fn new(config: &PredictionConfig) -> Self {
        Self::with_model(LinearModel::prior(), config)
    }

    pub fn with_model(model: LinearModel, config: &PredictionConfig) -> Self {
        Self {
            model: RwLock::new(model),
            features: FeatureCache::new(config.feature_cache_capacity),
            learning_rate: config.learning_rate,
        }
    }

    /// Copy of the current model.
    pub fn snapshot(&self) -> Result<LinearModel, ModelError> {
        self.model
            .read()
            .map(|m| m.clone())
            .map_err(|_| ModelError::LockPoisoned {
                stage: "snapshot".to_string(),
            })
    }

    pub fn version(&self) -> Result<u64, ModelError> {
        self.snapshot().map(|m| m.version)
    }

    pub fn feature_cache(&self) -> &FeatureCache {
        &self.features
    }

    /// Apply one gradient step toward `actual_outcome`.
    ///
    /// Inputs are validated before the lock is taken; a rejected update
    /// leaves weights, version, and cache untouched. Returns the new version.
    pub fn update(
        &self,
        actual_outcome: f64,
        predicted_score: f64,
        features: &FeatureVector,
    ) -> Result<u64, ModelError> {
        if let Err(e) = validate_inputs(actual_outcome, predicted_score, features) {
            events::model_update_rejected("validate", &e.to_string());
            return Err(e);
        }

        let error = actual_outcome - predicted_score;
        let mut model = self.model.write().map_err(|_| ModelError::LockPoisoned {
            stage: "update".to_string(),
        })?;
        model.apply_gradient(error, features, self.learning_rate);
        self.features.invalidate_all();
        let (version, bias) = (model.version, model.bias);
        drop(model);

        events::cache_invalidated("features", "all");
        events::model_updated(version, error, bias);
        Ok(version)
    }
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new(&PredictionConfig::default())
    }
}

fn validate_inputs(
    actual_outcome: f64,
    predicted_score: f64,
    features: &FeatureVector,
) -> Result<(), ModelError> {
    for (field, value) in [("actual_outcome", actual_outcome), ("predicted_score", predicted_score)] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ModelError::InvalidOutcome {
                field: field.to_string(),
                value,
            });
        }
    }
    features.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FeatureKey;

    fn features() -> FeatureVector {
        FeatureVector {
            historical_adherence: 0.8,
            recent_trend: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn update_bumps_version_and_clears_cache() {
        let store = ModelStore::default();
        let key = FeatureKey {
            patient_id: "p".into(),
            medication_id: "m".into(),
            content_hash: "abc123".into(),
            model_version: 0,
        };
        store.feature_cache().insert(key.clone(), features());

        let version = store.update(1.0, 0.6, &features()).unwrap();
        assert_eq!(version, 1);
        assert_eq!(store.version().unwrap(), 1);
        assert!(store.feature_cache().get(&key).is_none());
        assert!(store.snapshot().unwrap().bias > 0.30);
    }

    #[test]
    fn nan_outcome_is_rejected_without_mutation() {
        let store = ModelStore::default();
        let before = store.snapshot().unwrap();
        let err = store.update(f64::NAN, 0.5, &features()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidOutcome { ref field, .. } if field == "actual_outcome"));
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn out_of_range_prediction_is_rejected() {
        let store = ModelStore::default();
        assert!(matches!(
            store.update(1.0, 1.5, &features()),
            Err(ModelError::InvalidOutcome { .. })
        ));
        assert_eq!(store.version().unwrap(), 0);
    }

    #[test]
    fn invalid_feature_is_rejected() {
        let store = ModelStore::default();
        let bad = FeatureVector {
            delay_pattern: f64::INFINITY,
            ..features()
        };
        assert!(matches!(
            store.update(1.0, 0.5, &bad),
            Err(ModelError::InvalidFeatureVector { .. })
        ));
        assert_eq!(store.snapshot().unwrap(), LinearModel::prior());
    }
}
