//! Collaborator interfaces. Implementations live outside the core (or in test fixtures).

pub mod festival_calendar;
pub mod prayer_times;
pub mod record_store;

pub use festival_calendar::FestivalCalendar;
pub use prayer_times::PrayerTimeProvider;
pub use record_store::RecordStore;
