//! Feature vector cache.
//!
//! Keyed explicitly by patient, medication, a blake3 hash of the extraction
//! inputs, and model version. A vector is never served for another patient,
//! for edited records, or under another model version. Cleared whole by
//! `ModelStore` while the model write lock is held, and per patient when the
//! host reports new or synced records.

use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;

use adherence_core::models::{AdherenceRecord, CulturalPattern, FeatureVector};
use adherence_observability::events;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureKey {
    pub patient_id: String,
    pub medication_id: String,
    /// See [`content_hash`].
    pub content_hash: String,
    pub model_version: u64,
}

/// blake3 hash over every record field and cultural figure that feeds
/// feature extraction, in input order.
pub fn content_hash(records: &[AdherenceRecord], cultural: &CulturalPattern) -> String {
    let mut hasher = blake3::Hasher::new();
    for r in records {
        hasher.update(r.id.as_bytes());
        hasher.update(&[0]);
        hasher.update(r.status.as_str().as_bytes());
        hasher.update(&[0, r.method as u8]);
        hasher.update(&r.scheduled_time.timestamp_micros().to_le_bytes());
        hasher.update(&r.taken_time.map_or(i64::MIN, |t| t.timestamp_micros()).to_le_bytes());
        hasher.update(&r.delay_minutes.unwrap_or(i64::MIN).to_le_bytes());
        hasher.update(&r.updated_at.timestamp_micros().to_le_bytes());
    }
    let supported = cultural
        .family_influence
        .as_ref()
        .map_or(u64::MAX, |f| f.supported_records as u64);
    hasher.update(&cultural.cultural_exposure().to_bits().to_le_bytes());
    hasher.update(&cultural.worst_festival_drop().to_bits().to_le_bytes());
    hasher.update(&supported.to_le_bytes());
    hasher.finalize().to_hex().to_string()
}

pub struct FeatureCache {
    cache: Cache<FeatureKey, FeatureVector>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FeatureCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &FeatureKey) -> Option<FeatureVector> {
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

    pub fn insert(&self, key: FeatureKey, features: FeatureVector) {
        self.cache.insert(key, features);
    }

    /// Drop every vector computed for a patient.
    pub fn invalidate_patient(&self, patient_id: &str) {
        self.cache.run_pending_tasks();
        let keys: Vec<FeatureKey> = self
            .cache
            .iter()
            .filter_map(|(k, _)| (k.patient_id == patient_id).then(|| k.as_ref().clone()))
            .collect();
        for key in &keys {
            self.cache.invalidate(key);
        }
        events::cache_invalidated("features", patient_id);
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}
