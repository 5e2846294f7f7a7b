use serde::{Deserialize, Serialize};

use super::defaults;

/// Metrics cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached metric summaries.
    pub metrics_cache_capacity: u64,
    /// Time-to-live for cached summaries (seconds). Bounds memory only;
    /// ingestion invalidates explicitly.
    pub metrics_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            metrics_cache_capacity: defaults::DEFAULT_METRICS_CACHE_CAPACITY,
            metrics_ttl_secs: defaults::DEFAULT_METRICS_TTL_SECS,
        }
    }
}
