use chrono::NaiveDate;

use crate::errors::CalendarError;
use crate::models::PrayerTimes;

/// Prayer-time lookup by date and location.
///
/// Implementations own fetching, retries and timeouts; the engine calls this
/// synchronously and treats a failure for one date as "no data for that date".
pub trait PrayerTimeProvider: Send + Sync {
    fn prayer_times(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> Result<PrayerTimes, CalendarError>;
}
