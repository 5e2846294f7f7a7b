//! Metrics summary cache.
//!
//! Uses `moka::sync::Cache` keyed explicitly by patient, medication and period.
//! Correctness comes from `invalidate_patient` on ingestion and sync write-back;
//! the TTL only bounds memory. Tracks hits/misses/rate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;

use adherence_core::config::CacheConfig;
use adherence_core::models::{AdherenceMetrics, AdherencePeriod};
use adherence_observability::events;

/// Cache key for one metrics summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricsKey {
    pub patient_id: String,
    /// `None` summarises every medication for the patient.
    pub medication_id: Option<String>,
    pub period: Option<AdherencePeriod>,
}

impl MetricsKey {
    pub fn new(
        patient_id: impl Into<String>,
        medication_id: Option<String>,
        period: Option<AdherencePeriod>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            medication_id,
            period,
        }
    }
}

pub struct MetricsCache {
    cache: Cache<MetricsKey, AdherenceMetrics>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MetricsCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.metrics_cache_capacity)
            .time_to_live(Duration::from_secs(config.metrics_ttl_secs))
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &MetricsKey) -> Option<AdherenceMetrics> {
        match self.cache.get(key) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: MetricsKey, metrics: AdherenceMetrics) {
        self.cache.insert(key, metrics);
    }

    /// Drop every summary for a patient, whatever its medication or period.
    pub fn invalidate_patient(&self, patient_id: &str) {
        self.cache.run_pending_tasks();
        let keys: Vec<MetricsKey> = self
            .cache
            .iter()
            .filter_map(|(k, _)| (k.patient_id == patient_id).then(|| k.as_ref().clone()))
            .collect();
        for key in &keys {
            self.cache.invalidate(key);
        }
        events::cache_invalidated("metrics", patient_id);
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        events::cache_invalidated("metrics", "all");
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = (self.hits() + self.misses()) as f64;
        if total == 0.0 {
            0.0
        } else {
            self.hits() as f64 / total
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(patient: &str, med: Option<&str>) -> MetricsKey {
        MetricsKey::new(patient, med.map(str::to_string), None)
    }

    #[test]
    fn tracks_hits_and_misses() {
        let cache = MetricsCache::default();
        assert!(cache.get(&key("p1", None)).is_none());
        cache.insert(key("p1", None), AdherenceMetrics::default());
        assert!(cache.get(&key("p1", None)).is_some());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalidate_patient_leaves_other_patients() {
        let cache = MetricsCache::default();
        cache.insert(key("p1", None), AdherenceMetrics::default());
        cache.insert(key("p1", Some("m1")), AdherenceMetrics::default());
        cache.insert(key("p2", Some("m1")), AdherenceMetrics::default());

        cache.invalidate_patient("p1");

        assert!(cache.get(&key("p1", None)).is_none());
        assert!(cache.get(&key("p1", Some("m1"))).is_none());
        assert!(cache.get(&key("p2", Some("m1"))).is_some());
    }
}
