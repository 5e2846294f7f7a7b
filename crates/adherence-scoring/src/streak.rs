//! Adherent-day streaks with a bounded recovery gap.
//!
//! A local calendar date is adherent when any dose scheduled on it was taken.
//! Adherent dates separated by at most `max_gap_days` belong to the same
//! streak; the streak length counts adherent days, not elapsed days.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use adherence_core::config::StreakConfig;
use adherence_core::constants::MINUTES_PER_HOUR;
use adherence_core::models::{AdherenceRecord, AdherenceStatus, StreakData};
use adherence_core::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: NaiveDate,
    end: NaiveDate,
    days: u32,
}

#[derive(Debug, Clone)]
pub struct StreakCalculator {
    config: StreakConfig,
    offset: FixedOffset,
}

impl StreakCalculator {
    pub fn new(config: StreakConfig, offset: FixedOffset) -> Self {
        Self { config, offset }
    }

    /// Compute streak statistics as seen at `as_of`. Records scheduled on a
    /// local date after `as_of`'s local date are ignored.
    pub fn calculate(&self, records: &[AdherenceRecord], as_of: DateTime<Utc>) -> StreakData {
        let today = time::local_date(as_of, self.offset);
        let max_gap = self.config.max_gap_days();

        let adherent: BTreeSet<NaiveDate> = records
            .iter()
            .filter(|r| r.status.is_taken())
            .map(|r| time::local_date(r.scheduled_time, self.offset))
            .filter(|d| *d <= today)
            .collect();

        let runs = collect_runs(&adherent, max_gap);

        let mut data = StreakData::default();

        if let Some(longest) = runs
            .iter()
            .copied()
            // Earliest run wins a tie so the reported window is stable.
            .fold(None::<Run>, |best, run| match best {
                Some(b) if b.days >= run.days => Some(b),
                _ => Some(run),
            })
        {
            data.longest_streak = longest.days;
            data.longest_streak_start = Some(longest.start);
            data.longest_streak_end = Some(longest.end);
        }

        if let Some(last) = runs.last() {
            if (today - last.end).num_days() <= max_gap {
                data.current_streak = last.days;
                data.current_streak_start = Some(last.start);
                data.current_streak_end = Some(last.end);
            }
        }

        let remaining = self.recovery_hours_remaining(records, as_of);
        data.recoverable = remaining.is_some();
        data.recovery_window_hours = remaining.unwrap_or(0.0);

        tracing::debug!(
            current = data.current_streak,
            longest = data.longest_streak,
            recoverable = data.recoverable,
            "streaks computed"
        );
        data
    }

    /// Hours left to recover when the latest dose due by `as_of` was missed
    /// and the recovery window has not yet elapsed.
    fn recovery_hours_remaining(
        &self,
        records: &[AdherenceRecord],
        as_of: DateTime<Utc>,
    ) -> Option<f64> {
        let latest = records
            .iter()
            .filter(|r| r.scheduled_time <= as_of)
            .max_by_key(|r| r.scheduled_time)?;
        if latest.status != AdherenceStatus::Missed {
            return None;
        }
        let elapsed_hours = time::minutes_between(latest.scheduled_time, as_of) as f64 / MINUTES_PER_HOUR;
        let window = self.config.recovery_window_hours as f64;
        (elapsed_hours <= window).then(|| window - elapsed_hours)
    }
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new(
            StreakConfig::default(),
            adherence_core::config::TimezoneConfig::default().offset(),
        )
    }
}

fn collect_runs(dates: &BTreeSet<NaiveDate>, max_gap: i64) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for &date in dates {
        match runs.last_mut() {
            Some(run) if (date - run.end).num_days() <= max_gap => {
                run.end = date;
                run.days += 1;
            }
            _ => runs.push(Run {
                start: date,
                end: date,
                days: 1,
            }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn myt() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    /// 09:00 local on 2025-03-01 plus `day` days.
    fn dose(day: i64, status: AdherenceStatus) -> AdherenceRecord {
        let scheduled = myt()
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
            + Duration::days(day);
        let mut r = AdherenceRecord::new(format!("d{day}"), "p", "m", scheduled);
        r.status = status;
        if status.requires_taken_time() {
            r.taken_time = Some(scheduled);
        }
        r
    }

    fn calc(recovery_hours: i64) -> StreakCalculator {
        StreakCalculator::new(
            StreakConfig {
                recovery_window_hours: recovery_hours,
            },
            myt(),
        )
    }

    #[test]
    fn missed_then_thirty_taken_days() {
        let mut records = vec![dose(0, AdherenceStatus::Missed)];
        records.extend((1..=30).map(|d| dose(d, AdherenceStatus::TakenOnTime)));
        let as_of = records[30].scheduled_time + Duration::hours(2);

        let data = calc(24).calculate(&records, as_of);
        assert_eq!(data.longest_streak, 30);
        assert_eq!(data.current_streak, 30);
        assert!(!data.recoverable);
    }

    #[test]
    fn gap_beyond_recovery_closes_streak() {
        let mut records: Vec<_> = (0..5).map(|d| dose(d, AdherenceStatus::TakenOnTime)).collect();
        records.push(dose(5, AdherenceStatus::Missed));
        records.push(dose(6, AdherenceStatus::Missed));
        records.extend((7..10).map(|d| dose(d, AdherenceStatus::TakenOnTime)));
        let as_of = records.last().unwrap().scheduled_time;

        let data = calc(24).calculate(&records, as_of);
        assert_eq!(data.longest_streak, 5);
        assert_eq!(data.current_streak, 3);
        assert!(data.current_streak <= data.longest_streak);
    }

    #[test]
    fn wider_recovery_window_bridges_gap() {
        let records = vec![
            dose(0, AdherenceStatus::TakenOnTime),
            dose(1, AdherenceStatus::Missed),
            dose(2, AdherenceStatus::TakenOnTime),
        ];
        let as_of = records[2].scheduled_time;
        assert_eq!(calc(24).calculate(&records, as_of).longest_streak, 1);
        assert_eq!(calc(48).calculate(&records, as_of).longest_streak, 2);
    }

    #[test]
    fn stale_streak_is_not_current() {
        let records: Vec<_> = (0..4).map(|d| dose(d, AdherenceStatus::TakenOnTime)).collect();
        let as_of = records[3].scheduled_time + Duration::days(5);
        let data = calc(24).calculate(&records, as_of);
        assert_eq!(data.current_streak, 0);
        assert_eq!(data.longest_streak, 4);
    }

    #[test]
    fn recent_miss_is_recoverable_with_remaining_hours() {
        let records = vec![
            dose(0, AdherenceStatus::TakenOnTime),
            dose(1, AdherenceStatus::Missed),
        ];
        let as_of = records[1].scheduled_time + Duration::hours(6);
        let data = calc(24).calculate(&records, as_of);
        assert!(data.recoverable);
        assert!((data.recovery_window_hours - 18.0).abs() < 1e-9);
        // Yesterday's dose keeps the streak alive today.
        assert_eq!(data.current_streak, 1);
    }

    #[test]
    fn old_miss_is_not_recoverable() {
        let records = vec![dose(0, AdherenceStatus::Missed)];
        let as_of = records[0].scheduled_time + Duration::hours(30);
        let data = calc(24).calculate(&records, as_of);
        assert!(!data.recoverable);
        assert_eq!(data.recovery_window_hours, 0.0);
    }

    #[test]
    fn future_records_are_ignored() {
        let records: Vec<_> = (0..10).map(|d| dose(d, AdherenceStatus::TakenOnTime)).collect();
        let as_of = records[2].scheduled_time;
        let data = calc(24).calculate(&records, as_of);
        assert_eq!(data.longest_streak, 3);
        assert_eq!(data.current_streak, 3);
    }

    #[test]
    fn empty_history_is_all_zero() {
        let data = StreakCalculator::default().calculate(&[], Utc::now());
        assert_eq!(data, StreakData::default());
    }
}
