use crate::errors::CalendarError;
use crate::models::FestivalDate;

/// Yearly festival and fasting-period table.
pub trait FestivalCalendar: Send + Sync {
    fn festivals(&self, year: i32) -> Result<Vec<FestivalDate>, CalendarError>;
}
