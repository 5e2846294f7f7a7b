use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::AdherenceRecord;

/// An offline batch uploaded by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub patient_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    pub records: Vec<AdherenceRecord>,
    pub synced_at: DateTime<Utc>,
}

/// Why two versions of a record disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// `updated_at` differed; most recent wins.
    Timing,
    /// `updated_at` tied, statuses differed.
    Status,
    /// Same status and timestamp; fields were merged.
    Merge,
}

impl ConflictType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timing => "timing",
            Self::Status => "status",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which version became authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    LocalWins,
    RemoteWins,
    Merged,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalWins => "local_wins",
            Self::RemoteWins => "remote_wins",
            Self::Merged => "merged",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry for one resolved conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub record_id: String,
    pub conflict_type: ConflictType,
    pub resolution: Resolution,
    pub local_updated_at: DateTime<Utc>,
    pub remote_updated_at: DateTime<Utc>,
}

/// Stage at which a record failed during batch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    Validate,
    Read,
    Resolve,
    Write,
}

impl ResolutionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Read => "read",
            Self::Resolve => "resolve",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that could not be resolved. Siblings are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub record_id: String,
    pub stage: ResolutionStage,
    pub message: String,
}

/// Outcome of resolving a batch. Never an error as a whole.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// True when no record failed.
    pub success: bool,
    /// Records examined, failures included.
    pub processed: usize,
    /// Authoritative records after resolution, in batch order.
    pub merged_records: Vec<AdherenceRecord>,
    pub conflicts: Vec<ConflictRecord>,
    pub errors: Vec<RecordFailure>,
}
