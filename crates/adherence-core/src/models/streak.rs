use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak statistics derived from a record set. Never persisted authoritatively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub current_streak_start: Option<NaiveDate>,
    pub current_streak_end: Option<NaiveDate>,
    pub longest_streak_start: Option<NaiveDate>,
    pub longest_streak_end: Option<NaiveDate>,
    /// The most recent dose was missed and can still be made up.
    pub recoverable: bool,
    /// Hours left in the recovery window; 0 when not recoverable.
    pub recovery_window_hours: f64,
}
