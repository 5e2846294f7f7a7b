use serde::{Deserialize, Serialize};

use super::defaults;

/// Streak tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    /// Grace period after a missed dose before a streak is considered broken.
    pub recovery_window_hours: i64,
}

impl StreakConfig {
    /// Largest calendar-day gap between adherent days that still continues a streak.
    /// Never less than one day (consecutive days always continue).
    pub fn max_gap_days(&self) -> i64 {
        (self.recovery_window_hours / crate::constants::HOURS_PER_DAY).max(1)
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            recovery_window_hours: defaults::DEFAULT_RECOVERY_WINDOW_HOURS,
        }
    }
}
