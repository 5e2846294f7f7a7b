//! Error handling for the adherence engine.
//! One error enum per subsystem, `thiserror` only.

pub mod adherence_error;
pub mod calendar_error;
pub mod config_error;
pub mod model_error;
pub mod record_error;
pub mod sync_error;

pub use adherence_error::{AdherenceError, AdherenceResult};
pub use calendar_error::CalendarError;
pub use config_error::ConfigError;
pub use model_error::ModelError;
pub use record_error::RecordError;
pub use sync_error::{StoreError, SyncError};
