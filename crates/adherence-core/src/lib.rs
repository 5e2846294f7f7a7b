//! # adherence-core
//!
//! Foundation crate for the adherence analytics engine.
//! Defines all records, derived models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod math;
pub mod models;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AdherenceConfig;
pub use errors::{AdherenceError, AdherenceResult};
pub use models::{AdherenceRecord, AdherenceStatus, CulturalContext, RecordMethod};
