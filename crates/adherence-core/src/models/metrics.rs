use std::fmt;

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Time-of-day bucket by local scheduled hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    /// 05:00–10:59
    Morning,
    /// 11:00–16:59
    Afternoon,
    /// 17:00–20:59
    Evening,
    /// 21:00–04:59, wrapping midnight.
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => Self::Morning,
            11..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adherence within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotStats {
    pub records: usize,
    pub taken: usize,
    pub missed: usize,
    /// Taken (incl. adjusted) over relevant records, percent, one decimal.
    pub adherence_rate: f64,
    /// Missed over relevant records, percent, one decimal.
    pub miss_rate: f64,
}

/// Per-slot and per-weekday consistency. Only buckets with at least one record appear.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub by_time_slot: Vec<(TimeSlot, SlotStats)>,
    pub by_weekday: Vec<(Weekday, SlotStats)>,
}

impl ConsistencyReport {
    pub fn slot(&self, slot: TimeSlot) -> Option<&SlotStats> {
        self.by_time_slot
            .iter()
            .find_map(|(s, stats)| (*s == slot).then_some(stats))
    }

    pub fn weekday(&self, day: Weekday) -> Option<&SlotStats> {
        self.by_weekday
            .iter()
            .find_map(|(d, stats)| (*d == day).then_some(stats))
    }
}

/// A half-open reporting period `[start, end)` over scheduled time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdherencePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AdherencePeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Summary statistics for a record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdherenceMetrics {
    pub total_records: usize,
    pub relevant_records: usize,
    pub taken_on_time: usize,
    pub taken_late: usize,
    pub taken_early: usize,
    pub adjusted: usize,
    pub missed: usize,
    pub skipped: usize,
    pub pending: usize,
    /// Unweighted taken share of relevant records, percent, one decimal.
    pub simple_rate: f64,
    /// Weighted period rate, percent, one decimal.
    pub weighted_rate: f64,
    /// Mean absolute deviation of taken doses, minutes.
    pub average_delay_minutes: f64,
    /// Mean dose score over scoreable records.
    pub average_dose_score: f64,
    pub consistency: ConsistencyReport,
    pub period: Option<AdherencePeriod>,
}
