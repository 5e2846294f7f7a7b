use serde::{Deserialize, Serialize};

use super::defaults;

/// Minutes before/after a prayer time that count as "near" it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrayerWindow {
    pub before_minutes: i64,
    pub after_minutes: i64,
}

impl PrayerWindow {
    pub const fn new(before_minutes: i64, after_minutes: i64) -> Self {
        Self {
            before_minutes,
            after_minutes,
        }
    }
}

/// Per-prayer proximity windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerWindows {
    pub fajr: PrayerWindow,
    pub zuhr: PrayerWindow,
    pub asr: PrayerWindow,
    pub maghrib: PrayerWindow,
    pub isya: PrayerWindow,
}

impl Default for PrayerWindows {
    fn default() -> Self {
        Self {
            fajr: PrayerWindow::new(30, 60),
            zuhr: PrayerWindow::new(15, 45),
            asr: PrayerWindow::new(15, 45),
            maghrib: PrayerWindow::new(10, 30),
            isya: PrayerWindow::new(15, 60),
        }
    }
}

/// Cultural correlation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CulturalConfig {
    /// Latitude used for prayer-time lookups when the caller gives none.
    pub default_latitude: f64,
    /// Longitude used for prayer-time lookups when the caller gives none.
    pub default_longitude: f64,
    /// Minimum records in a prayer/festival/family bucket before comparing.
    pub min_bucket_records: usize,
    /// Minimum records overall before any cultural comparison runs.
    pub min_total_records: usize,
    /// Gap (points) between bucket and overall rate that counts as significant.
    pub significance_margin: f64,
    pub prayer_windows: PrayerWindows,
}

impl Default for CulturalConfig {
    fn default() -> Self {
        Self {
            default_latitude: defaults::DEFAULT_LATITUDE,
            default_longitude: defaults::DEFAULT_LONGITUDE,
            min_bucket_records: defaults::DEFAULT_CULTURAL_MIN_BUCKET_RECORDS,
            min_total_records: defaults::DEFAULT_CULTURAL_MIN_TOTAL_RECORDS,
            significance_margin: defaults::DEFAULT_CULTURAL_MARGIN,
            prayer_windows: PrayerWindows::default(),
        }
    }
}
