//! PredictionEngine: features → model score → per-timeframe predictions.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use adherence_core::config::{AdherenceConfig, PredictionConfig};
use adherence_core::errors::{AdherenceResult, ModelError};
use adherence_core::math::round1;
use adherence_core::models::{
    AdherencePattern, AdherencePrediction, AdherenceRecord, CulturalPattern, FeatureVector,
    Medication, Timeframe,
};
use adherence_observability::events;

use crate::cache::{content_hash, FeatureKey};
use crate::factors::top_factors;
use crate::features::FeatureExtractor;
use crate::recommendations;
use crate::risk;
use crate::store::ModelStore;

pub struct PredictionEngine {
    config: PredictionConfig,
    store: Arc<ModelStore>,
    extractor: FeatureExtractor,
}

impl PredictionEngine {
    pub fn new(config: &AdherenceConfig, store: Arc<ModelStore>) -> Self {
        Self {
            config: config.prediction.clone(),
            store,
            extractor: FeatureExtractor::from_config(config),
        }
    }

    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }

    /// Feature vector for `medication`, served from the cache when the
    /// patient, the extraction inputs, and the model version all match.
    /// Records for other medications are ignored; records from more than one
    /// patient are refused.
    pub fn features(
        &self,
        medication: &Medication,
        records: &[AdherenceRecord],
        cultural: &CulturalPattern,
        model_version: u64,
    ) -> AdherenceResult<FeatureVector> {
        let own = own_records(medication, records)?;
        self.features_for(medication, &own, cultural, model_version)
    }

    fn features_for(
        &self,
        medication: &Medication,
        own: &[AdherenceRecord],
        cultural: &CulturalPattern,
        model_version: u64,
    ) -> AdherenceResult<FeatureVector> {
        let patient_id = own
            .first()
            .map_or_else(|| cultural.patient_id.clone(), |r| r.patient_id.clone());
        let key = FeatureKey {
            patient_id,
            medication_id: medication.id.clone(),
            content_hash: content_hash(own, cultural),
            model_version,
        };
        if let Some(cached) = self.store.feature_cache().get(&key) {
            tracing::debug!(
                patient_id = %key.patient_id,
                medication_id = %medication.id,
                model_version,
                "feature cache hit"
            );
            return Ok(cached);
        }
        let features = self.extractor.extract(medication, own, cultural)?;
        self.store.feature_cache().insert(key, features);
        Ok(features)
    }

    /// One prediction per timeframe, shortest first.
    ///
    /// Only records for `medication` are considered. Fails with
    /// `ModelError::NoRecords` when none remain and with
    /// `ModelError::MixedPatients` when they belong to several patients.
    pub fn generate(
        &self,
        medication: &Medication,
        records: &[AdherenceRecord],
        patterns: &[AdherencePattern],
        cultural: &CulturalPattern,
        generated_at: DateTime<Utc>,
    ) -> AdherenceResult<Vec<AdherencePrediction>> {
        let own = own_records(medication, records)?;
        if own.is_empty() {
            return Err(ModelError::NoRecords {
                medication_id: medication.id.clone(),
            }
            .into());
        }

        let model = self.store.snapshot()?;
        let features = self.features_for(medication, &own, cultural, model.version)?;
        let model_score = model.score(&features);
        let relevant = own.iter().filter(|r| r.status.counts_toward_rate()).count();
        let factors = top_factors(&model, &features, self.config.max_factors);

        let all_patterns: Vec<AdherencePattern> = patterns
            .iter()
            .chain(cultural.patterns.iter())
            .cloned()
            .collect();

        let predictions: Vec<AdherencePrediction> = Timeframe::ALL
            .iter()
            .map(|&timeframe| {
                let score =
                    risk::blended_score(model_score, features.historical_adherence, timeframe);
                let risk_level = risk::classify(score);
                AdherencePrediction {
                    medication_id: medication.id.clone(),
                    timeframe,
                    predicted_rate: round1(score * 100.0),
                    confidence: risk::confidence(relevant, timeframe, &self.config),
                    risk_level,
                    factors: factors.clone(),
                    recommendations: recommendations::build(
                        risk_level,
                        medication,
                        &all_patterns,
                        self.config.max_recommendations,
                    ),
                    generated_at,
                }
            })
            .collect();

        events::predictions_generated(
            &medication.id,
            risk::classify(model_score).as_str(),
            model_score,
        );
        Ok(predictions)
    }

    /// Online update of the shared model. See [`ModelStore::update`].
    pub fn update_model(
        &self,
        actual_outcome: f64,
        predicted_score: f64,
        features: &FeatureVector,
    ) -> AdherenceResult<u64> {
        Ok(self.store.update(actual_outcome, predicted_score, features)?)
    }
}

/// Records for `medication`, all from one patient.
fn own_records(
    medication: &Medication,
    records: &[AdherenceRecord],
) -> Result<Vec<AdherenceRecord>, ModelError> {
    let own: Vec<AdherenceRecord> = records
        .iter()
        .filter(|r| r.medication_id == medication.id)
        .cloned()
        .collect();
    let patients: BTreeSet<&str> = own.iter().map(|r| r.patient_id.as_str()).collect();
    if patients.len() > 1 {
        return Err(ModelError::MixedPatients {
            medication_id: medication.id.clone(),
            patients: patients.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(own)
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(&AdherenceConfig::default(), Arc::new(ModelStore::default()))
    }
}
