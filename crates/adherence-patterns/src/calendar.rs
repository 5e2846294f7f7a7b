//! Built-in Malaysian festival table.

use chrono::NaiveDate;

use adherence_core::errors::CalendarError;
use adherence_core::models::FestivalDate;
use adherence_core::traits::FestivalCalendar;

/// (name, cultural group, year, month, day, extra days after start, fasting period)
type Entry = (&'static str, &'static str, i32, u32, u32, u32, bool);

const TABLE: &[Entry] = &[
    ("Thaipusam", "indian", 2024, 1, 25, 0, false),
    ("Chinese New Year", "chinese", 2024, 2, 10, 1, false),
    ("Ramadan", "malay", 2024, 3, 11, 29, true),
    ("Hari Raya Aidilfitri", "malay", 2024, 4, 10, 1, false),
    ("Wesak Day", "buddhist", 2024, 5, 22, 0, false),
    ("Hari Raya Haji", "malay", 2024, 6, 17, 0, false),
    ("Deepavali", "indian", 2024, 10, 31, 0, false),
    ("Christmas", "christian", 2024, 12, 25, 0, false),
    ("Chinese New Year", "chinese", 2025, 1, 29, 1, false),
    ("Thaipusam", "indian", 2025, 2, 11, 0, false),
    ("Ramadan", "malay", 2025, 3, 1, 29, true),
    ("Hari Raya Aidilfitri", "malay", 2025, 3, 31, 1, false),
    ("Wesak Day", "buddhist", 2025, 5, 12, 0, false),
    ("Hari Raya Haji", "malay", 2025, 6, 7, 0, false),
    ("Deepavali", "indian", 2025, 10, 20, 0, false),
    ("Christmas", "christian", 2025, 12, 25, 0, false),
    ("Thaipusam", "indian", 2026, 2, 1, 0, false),
    ("Chinese New Year", "chinese", 2026, 2, 17, 1, false),
    ("Ramadan", "malay", 2026, 2, 19, 29, true),
    ("Hari Raya Aidilfitri", "malay", 2026, 3, 21, 1, false),
    ("Hari Raya Haji", "malay", 2026, 5, 27, 0, false),
    ("Wesak Day", "buddhist", 2026, 5, 31, 0, false),
    ("Deepavali", "indian", 2026, 11, 8, 0, false),
    ("Christmas", "christian", 2026, 12, 25, 0, false),
];

/// Festival calendar backed by a compiled table covering 2024–2026.
/// Years outside the table report `FestivalsUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFestivalCalendar;

impl StaticFestivalCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn covers(year: i32) -> bool {
        TABLE.iter().any(|e| e.2 == year)
    }
}

impl FestivalCalendar for StaticFestivalCalendar {
    fn festivals(&self, year: i32) -> Result<Vec<FestivalDate>, CalendarError> {
        if !Self::covers(year) {
            return Err(CalendarError::FestivalsUnavailable { year });
        }
        Ok(TABLE
            .iter()
            .filter(|e| e.2 == year)
            .filter_map(|&(name, group, y, m, d, extra, fasting)| {
                Some(FestivalDate {
                    name: name.to_string(),
                    start: NaiveDate::from_ymd_opt(y, m, d)?,
                    duration_days: extra,
                    cultural_group: group.to_string(),
                    is_fasting_period: fasting,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_covered_year_has_all_observances() {
        for year in 2024..=2026 {
            let festivals = StaticFestivalCalendar.festivals(year).unwrap();
            assert_eq!(festivals.len(), 8, "{year}");
            assert_eq!(festivals.iter().filter(|f| f.is_fasting_period).count(), 1);
        }
    }

    #[test]
    fn ramadan_2025_spans_thirty_days() {
        let ramadan = StaticFestivalCalendar
            .festivals(2025)
            .unwrap()
            .into_iter()
            .find(|f| f.name == "Ramadan")
            .unwrap();
        assert!(ramadan.contains(NaiveDate::from_ymd_opt(2025, 3, 30).unwrap()));
        assert!(!ramadan.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
    }

    #[test]
    fn uncovered_year_is_an_error() {
        assert!(matches!(
            StaticFestivalCalendar.festivals(2031),
            Err(CalendarError::FestivalsUnavailable { year: 2031 })
        ));
    }
}
