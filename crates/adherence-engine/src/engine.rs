//! AdherenceEngine: the host-facing facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use adherence_core::config::AdherenceConfig;
use adherence_core::errors::AdherenceResult;
use adherence_core::models::{
    AdherenceMetrics, AdherencePattern, AdherencePeriod, AdherencePrediction, AdherenceRecord,
    BatchResult, BatchUpdate, CulturalPattern, FamilySupportEvent, FeatureVector, Medication,
    StreakData,
};
use adherence_core::traits::{FestivalCalendar, PrayerTimeProvider, RecordStore};
use adherence_observability::{
    aggregation_span, cultural_span, model_update_span, pattern_span, prediction_span,
    scoring_span, sync_span,
};
use adherence_patterns::{CulturalPatternAnalyzer, PatternDetector, StaticFestivalCalendar};
use adherence_prediction::{ModelStore, PredictionEngine};
use adherence_scoring::{
    DoseScorer, MetricsCache, MetricsCalculator, MetricsKey, RateCalculator, StreakCalculator,
};
use adherence_sync::SyncResolver;

/// External services the engine consumes.
pub struct Collaborators {
    pub prayer_times: Arc<dyn PrayerTimeProvider>,
    pub festivals: Arc<dyn FestivalCalendar>,
    pub store: Arc<dyn RecordStore>,
}

impl Collaborators {
    /// Uses the built-in Malaysian festival table.
    pub fn new(prayer_times: Arc<dyn PrayerTimeProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            prayer_times,
            festivals: Arc::new(StaticFestivalCalendar::new()),
            store,
        }
    }

    pub fn with_festivals(mut self, festivals: Arc<dyn FestivalCalendar>) -> Self {
        self.festivals = festivals;
        self
    }
}

pub struct AdherenceEngine {
    config: AdherenceConfig,
    scorer: DoseScorer,
    rate: RateCalculator,
    streaks: StreakCalculator,
    detector: PatternDetector,
    cultural: CulturalPatternAnalyzer,
    prediction: PredictionEngine,
    sync: SyncResolver,
    store: Arc<dyn RecordStore>,
    metrics: MetricsCalculator,
    metrics_cache: MetricsCache,
}

impl AdherenceEngine {
    /// Validate `config` and build every component with a fresh model.
    pub fn new(config: AdherenceConfig, collaborators: Collaborators) -> AdherenceResult<Self> {
        let model = Arc::new(ModelStore::new(&config.prediction));
        Self::with_model_store(config, collaborators, model)
    }

    /// Like [`new`](Self::new) but sharing an existing model across engines.
    pub fn with_model_store(
        config: AdherenceConfig,
        collaborators: Collaborators,
        model: Arc<ModelStore>,
    ) -> AdherenceResult<Self> {
        config.validate()?;
        let offset = config.timezone.offset();

        Ok(Self {
            scorer: DoseScorer::new(config.scoring.clone()),
            rate: RateCalculator::new(config.rate.clone()),
            streaks: StreakCalculator::new(config.streak.clone(), offset),
            detector: PatternDetector::from_config(&config),
            cultural: CulturalPatternAnalyzer::new(
                &config,
                collaborators.prayer_times,
                collaborators.festivals,
            ),
            prediction: PredictionEngine::new(&config, model),
            sync: SyncResolver::new(Arc::clone(&collaborators.store)),
            store: collaborators.store,
            metrics: MetricsCalculator::from_config(&config),
            metrics_cache: MetricsCache::new(&config.cache),
            config,
        })
    }

    pub fn config(&self) -> &AdherenceConfig {
        &self.config
    }

    pub fn model_store(&self) -> &Arc<ModelStore> {
        self.prediction.store()
    }

    pub fn metrics_cache(&self) -> &MetricsCache {
        &self.metrics_cache
    }

    pub fn score_dose(&self, record: &AdherenceRecord) -> AdherenceResult<u8> {
        let _span = scoring_span!(record.id).entered();
        Ok(self.scorer.score(record)?)
    }

    pub fn calculate_rate(&self, records: &[AdherenceRecord]) -> AdherenceResult<f64> {
        let _span = aggregation_span!("rate", records.len()).entered();
        Ok(self.rate.calculate(records)?)
    }

    pub fn calculate_streaks(&self, records: &[AdherenceRecord], as_of: DateTime<Utc>) -> StreakData {
        let _span = aggregation_span!("streak", records.len()).entered();
        self.streaks.calculate(records, as_of)
    }

    pub fn detect_patterns(&self, records: &[AdherenceRecord]) -> Vec<AdherencePattern> {
        let _span = pattern_span!(records.len()).entered();
        self.detector.detect(records)
    }

    pub fn analyze_cultural_patterns(
        &self,
        records: &[AdherenceRecord],
        patient_id: &str,
        family_support: &[FamilySupportEvent],
    ) -> CulturalPattern {
        let _span = cultural_span!(patient_id, records.len()).entered();
        self.cultural.analyze(records, patient_id, family_support)
    }

    pub fn generate_predictions(
        &self,
        medication: &Medication,
        records: &[AdherenceRecord],
        patterns: &[AdherencePattern],
        cultural: &CulturalPattern,
    ) -> AdherenceResult<Vec<AdherencePrediction>> {
        let _span = prediction_span!(medication.id, records.len()).entered();
        self.prediction
            .generate(medication, records, patterns, cultural, Utc::now())
    }

    /// Feature vector the next prediction for `medication` would use.
    pub fn features(
        &self,
        medication: &Medication,
        records: &[AdherenceRecord],
        cultural: &CulturalPattern,
    ) -> AdherenceResult<FeatureVector> {
        let version = self.model_store().version()?;
        self.prediction.features(medication, records, cultural, version)
    }

    pub fn update_model(
        &self,
        actual_outcome: f64,
        predicted_score: f64,
        features: &FeatureVector,
    ) -> AdherenceResult<()> {
        let _span = model_update_span!(actual_outcome, predicted_score).entered();
        self.prediction
            .update_model(actual_outcome, predicted_score, features)?;
        Ok(())
    }

    /// Resolve an offline batch. Cached metrics and features for the patient
    /// are dropped once anything was written back.
    pub fn resolve_batch(&self, batch: &BatchUpdate) -> BatchResult {
        let _span = sync_span!(batch.patient_id, batch.records.len()).entered();
        let result = self.sync.resolve_batch(batch);
        if !result.merged_records.is_empty() {
            self.invalidate_patient(&batch.patient_id);
        }
        result
    }

    /// Summary metrics for a patient, optionally narrowed to one medication
    /// and a period. Served from the cache until the patient's records change.
    pub fn metrics(
        &self,
        patient_id: &str,
        medication_id: Option<&str>,
        records: &[AdherenceRecord],
        period: Option<AdherencePeriod>,
    ) -> AdherenceResult<AdherenceMetrics> {
        let _span = aggregation_span!("metrics", records.len()).entered();
        let key = MetricsKey::new(patient_id, medication_id.map(str::to_string), period);
        if let Some(cached) = self.metrics_cache.get(&key) {
            return Ok(cached);
        }

        let scoped: Vec<AdherenceRecord> = records
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .filter(|r| medication_id.map_or(true, |m| r.medication_id == m))
            .cloned()
            .collect();
        self.summarize_into(key, &scoped)
    }

    /// [`metrics`](Self::metrics) over the records the store holds for one
    /// patient/medication pair.
    pub fn stored_metrics(
        &self,
        patient_id: &str,
        medication_id: &str,
        period: Option<AdherencePeriod>,
    ) -> AdherenceResult<AdherenceMetrics> {
        let key = MetricsKey::new(patient_id, Some(medication_id.to_string()), period);
        if let Some(cached) = self.metrics_cache.get(&key) {
            return Ok(cached);
        }
        let records = self.store.records_for(patient_id, medication_id)?;
        let _span = aggregation_span!("stored_metrics", records.len()).entered();
        self.summarize_into(key, &records)
    }

    fn summarize_into(
        &self,
        key: MetricsKey,
        records: &[AdherenceRecord],
    ) -> AdherenceResult<AdherenceMetrics> {
        let summary = self.metrics.summarize(records, key.period)?;
        self.metrics_cache.insert(key, summary.clone());
        Ok(summary)
    }

    /// Host notification that new records exist for `patient_id`.
    pub fn records_ingested(&self, patient_id: &str) {
        self.invalidate_patient(patient_id);
    }

    fn invalidate_patient(&self, patient_id: &str) {
        self.metrics_cache.invalidate_patient(patient_id);
        self.model_store().feature_cache().invalidate_patient(patient_id);
    }
}
