//! Static recommendation tables keyed on risk tier and detected patterns.

use std::collections::HashSet;

use adherence_core::models::{
    AdherencePattern, Medication, PatternImpact, PatternType, Recommendation,
    RecommendationPriority, RiskLevel,
};

use RecommendationPriority::{High, Low, Medium, Urgent};

/// (priority, category, message, expected improvement in points)
type Entry = (RecommendationPriority, &'static str, &'static str, f64);

const CARE_TEAM: Entry = (
    Urgent,
    "clinical",
    "Contact the care team to review the medication plan",
    25.0,
);
const REMINDERS: Entry = (High, "reminders", "Enable reminders for every scheduled dose", 15.0);
const ROUTINE: Entry = (Medium, "routine", "Link each dose to a fixed daily routine", 10.0);
const KEEP_GOING: Entry = (Low, "encouragement", "Keep up the current routine", 2.0);

const CRITICAL_MEDICATION: Entry = (
    Urgent,
    "clinical",
    "This medication is critical; arrange caregiver checks after missed doses",
    20.0,
);

fn for_risk(risk: RiskLevel) -> &'static [Entry] {
    match risk {
        RiskLevel::Critical => &[CARE_TEAM, REMINDERS, ROUTINE],
        RiskLevel::High => &[REMINDERS, ROUTINE],
        RiskLevel::Medium => &[ROUTINE],
        RiskLevel::Low => &[KEEP_GOING],
    }
}

fn for_pattern(pattern_type: PatternType) -> Option<Entry> {
    let entry = match pattern_type {
        PatternType::EveningMissed => (
            High,
            "timing",
            "Move the evening reminder closer to dinner",
            12.0,
        ),
        PatternType::WeekendDecline => (Medium, "routine", "Set separate weekend reminders", 8.0),
        PatternType::DecliningTrend => (
            High,
            "follow_up",
            "Schedule a follow-up to discuss recent difficulties",
            15.0,
        ),
        PatternType::PrayerTimeConflict => (
            Medium,
            "cultural",
            "Align dose times with the daily prayer schedule",
            7.0,
        ),
        PatternType::FastingAdjustment => (
            Medium,
            "cultural",
            "Plan sahur and iftar dosing with the doctor",
            10.0,
        ),
        PatternType::FestivalDisruption => (
            Medium,
            "planning",
            "Prepare doses and reminders ahead of festival periods",
            6.0,
        ),
        _ => return None,
    };
    Some(entry)
}

/// Risk-tier advice plus pattern-conditional additions.
///
/// Positive patterns add nothing. Deduplicated by message, sorted by
/// priority then expected improvement, capped at `max`.
pub fn build(
    risk: RiskLevel,
    medication: &Medication,
    patterns: &[AdherencePattern],
    max: usize,
) -> Vec<Recommendation> {
    let mut entries: Vec<Entry> = for_risk(risk).to_vec();
    entries.extend(
        patterns
            .iter()
            .filter(|p| p.impact != PatternImpact::Positive)
            .filter_map(|p| for_pattern(p.pattern_type)),
    );
    if medication.is_critical && risk >= RiskLevel::High {
        entries.push(CRITICAL_MEDICATION);
    }

    let mut seen = HashSet::new();
    let mut out: Vec<Recommendation> = entries
        .into_iter()
        .filter(|(_, _, message, _)| seen.insert(*message))
        .map(|(priority, category, message, expected_improvement)| Recommendation {
            priority,
            category: category.to_string(),
            message: message.to_string(),
            expected_improvement,
        })
        .collect();
    out.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.expected_improvement.total_cmp(&a.expected_improvement))
    });
    out.truncate(max);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(pattern_type: PatternType, impact: PatternImpact) -> AdherencePattern {
        AdherencePattern {
            pattern_type,
            impact,
            description: String::new(),
            confidence: 1.0,
            occurrences: 10,
            metric: 0.0,
            affected_medications: vec![],
            recommendations: vec![],
            cultural_factors: vec![],
        }
    }

    #[test]
    fn low_risk_gets_encouragement() {
        let recs = build(RiskLevel::Low, &Medication::new("m", "M", 1), &[], 5);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Low);
    }

    #[test]
    fn critical_medication_at_high_risk_leads() {
        let mut med = Medication::new("m", "Warfarin", 1);
        med.is_critical = true;
        let recs = build(RiskLevel::High, &med, &[], 5);
        assert_eq!(recs[0].message, CRITICAL_MEDICATION.2);
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn patterns_add_sorted_deduplicated_entries() {
        let patterns = [
            pattern(PatternType::EveningMissed, PatternImpact::Negative),
            pattern(PatternType::EveningMissed, PatternImpact::Negative),
            pattern(PatternType::MorningConsistency, PatternImpact::Positive),
            pattern(PatternType::DecliningTrend, PatternImpact::Negative),
        ];
        let recs = build(RiskLevel::High, &Medication::new("m", "M", 1), &patterns, 5);
        let messages: Vec<_> = recs.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Enable reminders for every scheduled dose",
                "Schedule a follow-up to discuss recent difficulties",
                "Move the evening reminder closer to dinner",
                "Link each dose to a fixed daily routine",
            ]
        );
    }

    #[test]
    fn capped_at_max() {
        let patterns: Vec<_> = [
            PatternType::EveningMissed,
            PatternType::WeekendDecline,
            PatternType::DecliningTrend,
            PatternType::PrayerTimeConflict,
            PatternType::FastingAdjustment,
            PatternType::FestivalDisruption,
        ]
        .into_iter()
        .map(|t| pattern(t, PatternImpact::Negative))
        .collect();
        let recs = build(RiskLevel::Critical, &Medication::new("m", "M", 1), &patterns, 5);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].priority, Urgent);
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));
    }
}
