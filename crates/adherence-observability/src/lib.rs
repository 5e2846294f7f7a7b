//! # adherence-observability
//!
//! Structured logging for the adherence engine: subscriber setup, one span
//! per public operation, and typed audit events carrying `patient_id`,
//! `medication_id` and `stage` fields.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::spans::names;
pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
