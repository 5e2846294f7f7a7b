use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds for the behavioral pattern battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Minimum records in a time-slot bucket before slot tests run.
    pub min_bucket_sample: usize,
    /// Sample size at which a pattern reaches full confidence.
    pub target_sample_size: usize,
    /// Morning adherence (%) at or above which consistency is reported.
    pub morning_consistency_threshold: f64,
    /// Evening miss-rate (%) at or above which missed evenings are reported.
    pub evening_miss_threshold: f64,
    /// Minimum records before the weekday/weekend comparison runs.
    pub weekend_min_records: usize,
    /// Weekday minus weekend gap (points) that signals a weekend decline.
    pub weekend_decline_margin: f64,
    /// Adjusted prayer-time doses needed for a prayer conflict pattern.
    pub prayer_conflict_min_occurrences: usize,
    /// Fasting-flagged records needed for a fasting pattern.
    pub fasting_min_records: usize,
    /// Gap (points) below overall at which fasting is reported as negative.
    pub fasting_margin: f64,
    /// Length of each trend comparison window in days.
    pub trend_window_days: i64,
    /// Minimum records before the trend test runs.
    pub trend_min_records: usize,
    /// Swing (points) between windows that signals a trend.
    pub trend_margin: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_bucket_sample: defaults::DEFAULT_MIN_BUCKET_SAMPLE,
            target_sample_size: defaults::DEFAULT_TARGET_SAMPLE_SIZE,
            morning_consistency_threshold: defaults::DEFAULT_MORNING_CONSISTENCY_THRESHOLD,
            evening_miss_threshold: defaults::DEFAULT_EVENING_MISS_THRESHOLD,
            weekend_min_records: defaults::DEFAULT_WEEKEND_MIN_RECORDS,
            weekend_decline_margin: defaults::DEFAULT_WEEKEND_DECLINE_MARGIN,
            prayer_conflict_min_occurrences: defaults::DEFAULT_PRAYER_CONFLICT_MIN_OCCURRENCES,
            fasting_min_records: defaults::DEFAULT_FASTING_MIN_RECORDS,
            fasting_margin: defaults::DEFAULT_FASTING_MARGIN,
            trend_window_days: defaults::DEFAULT_TREND_WINDOW_DAYS,
            trend_min_records: defaults::DEFAULT_TREND_MIN_RECORDS,
            trend_margin: defaults::DEFAULT_TREND_MARGIN,
        }
    }
}
