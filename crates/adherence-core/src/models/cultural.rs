use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::pattern::AdherencePattern;

/// The five daily prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    Fajr,
    Zuhr,
    Asr,
    Maghrib,
    Isya,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Self::Fajr,
        Self::Zuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isya,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Zuhr => "zuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isya => "isya",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily prayer schedule as returned by the prayer-time collaborator (`HH:mm`, local time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: String,
    pub zuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isya: String,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> &str {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Zuhr => &self.zuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isya => &self.isya,
        }
    }
}

/// Latitude/longitude for prayer-time lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One entry of the yearly festival table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalDate {
    pub name: String,
    pub start: NaiveDate,
    pub duration_days: u32,
    pub cultural_group: String,
    /// The window is a fasting period (e.g. Ramadan) rather than a celebration.
    #[serde(default)]
    pub is_fasting_period: bool,
}

impl FestivalDate {
    /// Last day of the window: `start + duration_days`, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.duration_days))
    }

    /// `date ∈ [start, start + duration_days]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}

/// A family-support action (reminder, supervised dose, pharmacy pickup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySupportEvent {
    pub occurred_at: DateTime<Utc>,
    pub kind: String,
    #[serde(default)]
    pub member: Option<String>,
}

/// Adherence near one prayer compared with the overall rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimeImpact {
    pub prayer: Prayer,
    pub records: usize,
    pub adherence_rate: f64,
    /// `adherence_rate − overall`, in points.
    pub delta: f64,
    pub significant: bool,
}

/// Adherence inside one festival window compared with the overall rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalImpact {
    pub festival_name: String,
    pub cultural_group: String,
    pub records: usize,
    pub adherence_rate: f64,
    pub delta: f64,
    pub significant: bool,
}

/// Adherence while fasting compared with the overall rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingImpact {
    pub records: usize,
    pub adherence_rate: f64,
    pub delta: f64,
    pub significant: bool,
}

/// Observed lift on days with family support. A co-occurrence, not a causal estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyInfluence {
    pub supported_days: usize,
    pub supported_records: usize,
    pub supported_rate: f64,
    /// Signed point delta `supported_rate − overall`.
    pub delta: f64,
    pub significant: bool,
}

/// Calendar-aware correlation results for one patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CulturalPattern {
    pub patient_id: String,
    pub total_records: usize,
    pub overall_rate: f64,
    pub prayer_time_impact: Vec<PrayerTimeImpact>,
    pub festival_impact: Vec<FestivalImpact>,
    pub fasting_impact: Option<FastingImpact>,
    pub family_influence: Option<FamilyInfluence>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub patterns: Vec<AdherencePattern>,
}

impl CulturalPattern {
    /// Share of records that carried any cultural signal, in [0, 1].
    pub fn cultural_exposure(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        let flagged = self
            .prayer_time_impact
            .iter()
            .map(|p| p.records)
            .sum::<usize>()
            + self.fasting_impact.as_ref().map_or(0, |f| f.records);
        (flagged as f64 / self.total_records as f64).clamp(0.0, 1.0)
    }

    /// Largest festival-window drop in points (0 when none).
    pub fn worst_festival_drop(&self) -> f64 {
        self.festival_impact
            .iter()
            .map(|f| -f.delta)
            .fold(0.0_f64, f64::max)
    }
}
