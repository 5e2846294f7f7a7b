//! # adherence-sync
//!
//! Resolves offline batches uploaded by patient devices against the
//! authoritative `RecordStore`.
//!
//! Resolution order per record: insert when unknown, keep when identical,
//! newest `updated_at` wins, taken beats not-taken on a timestamp tie, and
//! otherwise the two versions are merged field by field.

pub mod detection;
pub mod resolution;
pub mod resolver;

pub use detection::{compare, Comparison};
pub use resolution::{merge, resolve, ResolutionOutcome};
pub use resolver::SyncResolver;
