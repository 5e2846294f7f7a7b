//! Deterministic collaborator doubles.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};

use adherence_core::errors::{CalendarError, StoreError};
use adherence_core::models::{AdherenceRecord, FestivalDate, PrayerTimes};
use adherence_core::traits::{FestivalCalendar, PrayerTimeProvider, RecordStore};

/// Same prayer times every day, optionally failing on chosen dates.
#[derive(Debug, Clone)]
pub struct FixedPrayerTimes {
    times: PrayerTimes,
    failing: HashSet<NaiveDate>,
}

impl FixedPrayerTimes {
    pub fn new(times: PrayerTimes) -> Self {
        Self {
            times,
            failing: HashSet::new(),
        }
    }

    /// Typical Kuala Lumpur times.
    pub fn kuala_lumpur() -> Self {
        Self::new(PrayerTimes {
            fajr: "05:55".into(),
            zuhr: "13:15".into(),
            asr: "16:35".into(),
            maghrib: "19:20".into(),
            isya: "20:30".into(),
        })
    }

    pub fn failing_on(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }
}

impl PrayerTimeProvider for FixedPrayerTimes {
    fn prayer_times(
        &self,
        date: NaiveDate,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<PrayerTimes, CalendarError> {
        if self.failing.contains(&date) {
            return Err(CalendarError::PrayerTimesUnavailable {
                date,
                reason: "upstream timeout".into(),
            });
        }
        Ok(self.times.clone())
    }
}

/// Festival table given up front; `unavailable` makes every lookup fail.
#[derive(Debug, Clone, Default)]
pub struct FixedFestivalCalendar {
    festivals: Vec<FestivalDate>,
    unavailable: bool,
}

impl FixedFestivalCalendar {
    pub fn new(festivals: Vec<FestivalDate>) -> Self {
        Self {
            festivals,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            festivals: Vec::new(),
            unavailable: true,
        }
    }
}

impl FestivalCalendar for FixedFestivalCalendar {
    fn festivals(&self, year: i32) -> Result<Vec<FestivalDate>, CalendarError> {
        if self.unavailable {
            return Err(CalendarError::FestivalsUnavailable { year });
        }
        Ok(self
            .festivals
            .iter()
            .filter(|f| f.start.year() == year)
            .cloned()
            .collect())
    }
}

/// `RecordStore` over a mutex-guarded map. Writes for ids registered with
/// `fail_writes_for` return `StoreError::WriteFailed`.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<String, AdherenceRecord>>,
    failing_writes: Mutex<HashSet<String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = AdherenceRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().expect("store lock");
            for r in records {
                map.insert(r.id.clone(), r);
            }
        }
        store
    }

    pub fn fail_writes_for(&self, record_id: &str) {
        self.failing_writes
            .lock()
            .expect("store lock")
            .insert(record_id.to_string());
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<AdherenceRecord> {
        let mut all: Vec<_> = self
            .records
            .lock()
            .expect("store lock")
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, record_id: &str) -> Result<Option<AdherenceRecord>, StoreError> {
        let map = self.records.lock().map_err(|e| StoreError::ReadFailed {
            record_id: record_id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(map.get(record_id).cloned())
    }

    fn put(&self, record: &AdherenceRecord) -> Result<(), StoreError> {
        let failing = self
            .failing_writes
            .lock()
            .map(|set| set.contains(&record.id))
            .unwrap_or(false);
        if failing {
            return Err(StoreError::WriteFailed {
                record_id: record.id.clone(),
                reason: "simulated write failure".into(),
            });
        }
        let mut map = self.records.lock().map_err(|e| StoreError::WriteFailed {
            record_id: record.id.clone(),
            reason: e.to_string(),
        })?;
        map.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn records_for(
        &self,
        patient_id: &str,
        medication_id: &str,
    ) -> Result<Vec<AdherenceRecord>, StoreError> {
        let map = self.records.lock().map_err(|e| StoreError::ReadFailed {
            record_id: format!("{patient_id}/{medication_id}"),
            reason: e.to_string(),
        })?;
        let mut out: Vec<_> = map
            .values()
            .filter(|r| r.patient_id == patient_id && r.medication_id == medication_id)
            .cloned()
            .collect();
        out.sort_by_key(|r| r.scheduled_time);
        Ok(out)
    }
}
