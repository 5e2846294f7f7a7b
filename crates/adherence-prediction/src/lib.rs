//! # adherence-prediction
//!
//! Forward-looking adherence risk per medication and timeframe.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Feature extraction (12 features in [0, 1]) | `features` |
//! | Linear model, seeded prior, online gradient step | `model` |
//! | Shared weights + feature cache behind one lock | `store`, `cache` |
//! | Risk tier and confidence | `risk` |
//! | Top contributing features | `factors` |
//! | Risk- and pattern-driven advice | `recommendations` |

pub mod cache;
pub mod engine;
pub mod factors;
pub mod features;
pub mod model;
pub mod recommendations;
pub mod risk;
pub mod store;

pub use cache::{content_hash, FeatureCache, FeatureKey};
pub use engine::PredictionEngine;
pub use features::FeatureExtractor;
pub use model::LinearModel;
pub use store::ModelStore;
