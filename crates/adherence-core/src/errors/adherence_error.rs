use super::{CalendarError, ConfigError, ModelError, RecordError, StoreError, SyncError};

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AdherenceError {
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AdherenceError {
    /// Stable machine-readable code for logs and host-side mapping.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Record(_) => "RECORD_INVALID",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Calendar(_) => "CALENDAR_ERROR",
            Self::Model(_) => "MODEL_ERROR",
            Self::Sync(_) => "SYNC_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

/// Convenience alias used across the workspace.
pub type AdherenceResult<T> = Result<T, AdherenceError>;
