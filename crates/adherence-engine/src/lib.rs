//! # adherence-engine
//!
//! Single entry point for hosts. Owns one instance of every component,
//! built from an [`AdherenceConfig`](adherence_core::AdherenceConfig) and
//! injected collaborators. Each operation runs inside its own tracing span.

pub mod engine;

pub use engine::{AdherenceEngine, Collaborators};

pub use adherence_core::{config, errors, models, traits};
pub use adherence_patterns::StaticFestivalCalendar;
pub use adherence_prediction::ModelStore;
