use chrono::NaiveDate;

/// Errors raised by prayer-time and festival collaborators.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CalendarError {
    #[error("prayer times unavailable for {date}: {reason}")]
    PrayerTimesUnavailable { date: NaiveDate, reason: String },

    #[error("malformed prayer time for {prayer} on {date}: {value:?}")]
    MalformedPrayerTime {
        date: NaiveDate,
        prayer: String,
        value: String,
    },

    #[error("festival table unavailable for {year}")]
    FestivalsUnavailable { year: i32 },
}
