//! # adherence-scoring
//!
//! Turns raw dose records into numbers:
//!
//! | Component | Output |
//! |-----------|--------|
//! | [`DoseScorer`] | 0–100 score for one dose (timing bands + cultural/reminder bonuses) |
//! | [`RateCalculator`] | Weighted period adherence rate |
//! | [`StreakCalculator`] | Current/longest streaks with a bounded recovery window |
//! | [`consistency`] | Per time-slot and per-weekday adherence |
//! | [`MetricsCalculator`] | Full summary, cached per patient/medication/period in [`MetricsCache`] |
//!
//! Everything here is a pure function of its inputs except the cache.

pub mod cache;
pub mod consistency;
pub mod metrics;
pub mod rate;
pub mod scorer;
pub mod streak;

pub use cache::{MetricsCache, MetricsKey};
pub use metrics::{filter_period, MetricsCalculator};
pub use rate::RateCalculator;
pub use scorer::{DoseScoreBreakdown, DoseScorer};
pub use streak::StreakCalculator;
