/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum dose score.
pub const MAX_DOSE_SCORE: u8 = 100;

/// Number of features in the prediction model.
pub const FEATURE_COUNT: usize = 12;

/// Minutes in an hour, for delay conversions.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Hours in a day, for recovery-window conversions.
pub const HOURS_PER_DAY: i64 = 24;

/// Maximum records accepted in one sync batch.
pub const MAX_SYNC_BATCH_SIZE: usize = 1000;
