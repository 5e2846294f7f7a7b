//! Time-of-day and day-of-week consistency buckets.

use std::collections::BTreeMap;

use chrono::{Datelike, FixedOffset, Weekday};

use adherence_core::math;
use adherence_core::models::{AdherenceRecord, AdherenceStatus, ConsistencyReport, SlotStats, TimeSlot};
use adherence_core::time;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    records: usize,
    taken: usize,
    missed: usize,
}

impl Tally {
    fn add(&mut self, status: AdherenceStatus) {
        self.records += 1;
        if status.is_dose_taken() {
            self.taken += 1;
        } else if status == AdherenceStatus::Missed {
            self.missed += 1;
        }
    }

    fn stats(self) -> SlotStats {
        SlotStats {
            records: self.records,
            taken: self.taken,
            missed: self.missed,
            adherence_rate: math::percent(self.taken, self.records),
            miss_rate: math::percent(self.missed, self.records),
        }
    }
}

/// Bucket relevant records by local scheduled hour and weekday.
/// Empty buckets are omitted from the report.
pub fn consistency_report(records: &[AdherenceRecord], offset: FixedOffset) -> ConsistencyReport {
    let mut slots: BTreeMap<TimeSlot, Tally> = BTreeMap::new();
    let mut days: BTreeMap<u32, (Weekday, Tally)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.status.counts_toward_rate()) {
        let local = record.scheduled_time.with_timezone(&offset);
        let slot = TimeSlot::from_hour(time::local_hour(record.scheduled_time, offset));
        slots.entry(slot).or_default().add(record.status);

        let weekday = local.weekday();
        days.entry(weekday.num_days_from_monday())
            .or_insert_with(|| (weekday, Tally::default()))
            .1
            .add(record.status);
    }

    ConsistencyReport {
        by_time_slot: slots.into_iter().map(|(s, t)| (s, t.stats())).collect(),
        by_weekday: days.into_values().map(|(d, t)| (d, t.stats())).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn at_local_hour(id: &str, day: i64, hour: u32, status: AdherenceStatus) -> AdherenceRecord {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2025-03-03 is a Monday.
        let scheduled = offset
            .with_ymd_and_hms(2025, 3, 3, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
            + Duration::days(day);
        let mut r = AdherenceRecord::new(id, "p", "m", scheduled);
        r.status = status;
        if status.requires_taken_time() {
            r.taken_time = Some(scheduled);
        }
        r
    }

    #[test]
    fn buckets_by_local_hour() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let records = vec![
            at_local_hour("a", 0, 8, AdherenceStatus::TakenOnTime),
            at_local_hour("b", 1, 8, AdherenceStatus::Missed),
            at_local_hour("c", 0, 19, AdherenceStatus::Adjusted),
            at_local_hour("d", 0, 23, AdherenceStatus::Pending),
        ];
        let report = consistency_report(&records, offset);

        let morning = report.slot(TimeSlot::Morning).unwrap();
        assert_eq!(morning.records, 2);
        assert_eq!(morning.adherence_rate, 50.0);
        assert_eq!(morning.miss_rate, 50.0);

        assert_eq!(report.slot(TimeSlot::Evening).unwrap().adherence_rate, 100.0);
        // Pending is not relevant, so the night bucket never appears.
        assert!(report.slot(TimeSlot::Night).is_none());
        assert!(report.slot(TimeSlot::Afternoon).is_none());
    }

    #[test]
    fn weekdays_are_ordered_monday_first() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let records = vec![
            at_local_hour("sun", 6, 9, AdherenceStatus::Missed),
            at_local_hour("mon", 0, 9, AdherenceStatus::TakenOnTime),
        ];
        let report = consistency_report(&records, offset);
        let order: Vec<Weekday> = report.by_weekday.iter().map(|(d, _)| *d).collect();
        assert_eq!(order, vec![Weekday::Mon, Weekday::Sun]);
        assert_eq!(report.weekday(Weekday::Sun).unwrap().miss_rate, 100.0);
    }
}
