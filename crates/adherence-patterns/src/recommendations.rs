//! Static recommendation lookup per pattern type.

use adherence_core::models::PatternType;

/// Suggested actions attached to a detected pattern.
pub fn for_pattern(pattern_type: PatternType) -> &'static [&'static str] {
    match pattern_type {
        PatternType::MorningConsistency => &[
            "Keep the current morning routine",
            "Anchor other daily doses to the same morning cue",
        ],
        PatternType::EveningMissed => &[
            "Set an evening reminder tied to dinner",
            "Ask a family member to check evening doses",
        ],
        PatternType::WeekendDecline => &[
            "Enable weekend reminders",
            "Keep a pill organizer with weekend essentials",
        ],
        PatternType::PrayerTimeConflict => &[
            "Schedule doses just after prayer instead of during it",
            "Discuss prayer-aligned timing with the pharmacist",
        ],
        PatternType::FastingAdjustment => &[
            "Review sahur and iftar dose timing with the doctor",
            "Use a reminder at iftar for doses moved during fasting",
        ],
        PatternType::ImprovingTrend => &["Acknowledge the progress and keep the current plan"],
        PatternType::DecliningTrend => &[
            "Review recent changes in daily routine",
            "Arrange a follow-up with the care team",
        ],
        PatternType::PrayerTimeImpact => &["Align reminders with the affected prayer time"],
        PatternType::FestivalDisruption => &[
            "Plan medication supply and reminders before festival periods",
            "Carry doses when travelling for celebrations",
        ],
        PatternType::FamilySupportEffect => &["Involve family members in the daily medication routine"],
    }
}

/// Owned copy of the lookup, as stored on `AdherencePattern`.
pub fn owned(pattern_type: PatternType) -> Vec<String> {
    for_pattern(pattern_type)
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_type_has_advice() {
        for t in [
            PatternType::MorningConsistency,
            PatternType::EveningMissed,
            PatternType::WeekendDecline,
            PatternType::PrayerTimeConflict,
            PatternType::FastingAdjustment,
            PatternType::ImprovingTrend,
            PatternType::DecliningTrend,
            PatternType::PrayerTimeImpact,
            PatternType::FestivalDisruption,
            PatternType::FamilySupportEffect,
        ] {
            assert!(!for_pattern(t).is_empty(), "{t}");
        }
    }
}
