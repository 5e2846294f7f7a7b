// Single source of truth for all default values.

// --- Timezone ---
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 480; // Malaysia Time, UTC+8

// --- Dose scoring ---
pub const DEFAULT_ON_TIME_WINDOW_MINUTES: i64 = 15;
pub const DEFAULT_SLIGHT_DEVIATION_MINUTES: i64 = 30;
pub const DEFAULT_MODERATE_DEVIATION_MINUTES: i64 = 60;
pub const DEFAULT_LATE_THRESHOLD_MINUTES: i64 = 120;
pub const DEFAULT_PRAYER_BONUS: u8 = 5;
pub const DEFAULT_FASTING_BONUS: u8 = 3;
pub const DEFAULT_REMINDER_BONUS: u8 = 5;
pub const DEFAULT_REMINDER_RESPONSE_MINUTES: i64 = 5;

// --- Rate weights ---
pub const DEFAULT_LATE_WINDOW_HOURS: f64 = 1.0;
pub const DEFAULT_EARLY_WEIGHT: f64 = 0.95;
pub const DEFAULT_ADJUSTED_WEIGHT: f64 = 0.9;
pub const DEFAULT_LATE_FLOOR_WEIGHT: f64 = 0.5;
pub const DEFAULT_BEYOND_WINDOW_WEIGHT: f64 = 0.3;

// --- Streaks ---
pub const DEFAULT_RECOVERY_WINDOW_HOURS: i64 = 24;

// --- Pattern detection ---
pub const DEFAULT_MIN_BUCKET_SAMPLE: usize = 10;
pub const DEFAULT_TARGET_SAMPLE_SIZE: usize = 20;
pub const DEFAULT_MORNING_CONSISTENCY_THRESHOLD: f64 = 85.0;
pub const DEFAULT_EVENING_MISS_THRESHOLD: f64 = 30.0;
pub const DEFAULT_WEEKEND_MIN_RECORDS: usize = 14;
pub const DEFAULT_WEEKEND_DECLINE_MARGIN: f64 = 15.0;
pub const DEFAULT_PRAYER_CONFLICT_MIN_OCCURRENCES: usize = 5;
pub const DEFAULT_FASTING_MIN_RECORDS: usize = 10;
pub const DEFAULT_FASTING_MARGIN: f64 = 10.0;
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_TREND_MIN_RECORDS: usize = 14;
pub const DEFAULT_TREND_MARGIN: f64 = 10.0;

// --- Cultural analysis ---
pub const DEFAULT_LATITUDE: f64 = 3.139; // Kuala Lumpur
pub const DEFAULT_LONGITUDE: f64 = 101.6869;
pub const DEFAULT_CULTURAL_MIN_BUCKET_RECORDS: usize = 5;
pub const DEFAULT_CULTURAL_MIN_TOTAL_RECORDS: usize = 10;
pub const DEFAULT_CULTURAL_MARGIN: f64 = 10.0;

// --- Prediction ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_FEATURE_CACHE_CAPACITY: u64 = 10_000;
pub const DEFAULT_MAX_FACTORS: usize = 5;
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;
pub const DEFAULT_CONFIDENCE_CAP: f64 = 0.8;
pub const DEFAULT_FULL_CONFIDENCE_RECORDS: usize = 100;

// --- Caches ---
pub const DEFAULT_METRICS_CACHE_CAPACITY: u64 = 1_000;
pub const DEFAULT_METRICS_TTL_SECS: u64 = 3_600; // 1 hour, memory bound only

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
