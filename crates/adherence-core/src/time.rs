//! Local-time helpers. All calendar bucketing (days, time slots, weekdays)
//! happens in the patient's local offset, never in UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Timelike, Utc};

/// Build a fixed offset from minutes east of UTC, falling back to UTC when
/// the value is out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Local calendar date of an instant.
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Local wall-clock time of an instant.
pub fn local_time(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveTime {
    instant.with_timezone(&offset).time()
}

/// Local hour (0-23) of an instant.
pub fn local_hour(instant: DateTime<Utc>, offset: FixedOffset) -> u32 {
    instant.with_timezone(&offset).hour()
}

/// Minutes between two instants, `later - earlier`, signed.
pub fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_minutes()
}

/// Parse an `HH:mm` wall-clock string.
pub fn parse_hh_mm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}
