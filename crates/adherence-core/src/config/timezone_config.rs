use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::time;

/// Local-time configuration used for every calendar bucketing decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// Minutes east of UTC.
    pub utc_offset_minutes: i32,
}

impl TimezoneConfig {
    /// The configured offset as a chrono `FixedOffset`.
    pub fn offset(&self) -> FixedOffset {
        time::offset_from_minutes(self.utc_offset_minutes)
    }
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: defaults::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}
