//! Records consumed by the engine and the derived models it produces.

pub mod cultural;
pub mod features;
pub mod medication;
pub mod metrics;
pub mod pattern;
pub mod prediction;
pub mod record;
pub mod streak;
pub mod sync;

pub use cultural::{
    CulturalPattern, FamilyInfluence, FamilySupportEvent, FastingImpact, FestivalDate,
    FestivalImpact, GeoPoint, Prayer, PrayerTimeImpact, PrayerTimes,
};
pub use features::{FeatureName, FeatureVector};
pub use medication::Medication;
pub use metrics::{AdherenceMetrics, AdherencePeriod, ConsistencyReport, SlotStats, TimeSlot};
pub use pattern::{AdherencePattern, PatternImpact, PatternType};
pub use prediction::{
    AdherencePrediction, PredictionFactor, Recommendation, RecommendationPriority, RiskLevel,
    Timeframe,
};
pub use record::{AdherenceRecord, AdherenceStatus, CulturalContext, MealTiming, RecordMethod};
pub use streak::StreakData;
pub use sync::{
    BatchResult, BatchUpdate, ConflictRecord, ConflictType, RecordFailure, Resolution,
    ResolutionStage,
};
