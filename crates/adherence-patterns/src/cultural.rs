//! Calendar-aware cultural correlation.
//!
//! Buckets records by proximity to prayer times, by festival and fasting
//! periods, and by days with family support, then compares each bucket's
//! rate with the overall rate. Lookups that fail for a date are logged and
//! the date is skipped.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime};

use adherence_core::config::{AdherenceConfig, CulturalConfig, PrayerWindow};
use adherence_core::errors::CalendarError;
use adherence_core::math;
use adherence_core::models::{
    AdherencePattern, AdherenceRecord, CulturalPattern, FamilyInfluence, FamilySupportEvent,
    FastingImpact, FestivalDate, FestivalImpact, GeoPoint, PatternImpact, PatternType, Prayer,
    PrayerTimeImpact,
};
use adherence_core::time;
use adherence_core::traits::{FestivalCalendar, PrayerTimeProvider};
use adherence_observability::events;

use crate::detector::taken_rate;
use crate::recommendations;

type PrayerSchedule = Vec<(Prayer, NaiveDateTime)>;

/// Days into January that a festival starting in December can still cover.
const YEAR_CARRYOVER_DAYS: u32 = 31;

pub struct CulturalPatternAnalyzer {
    config: CulturalConfig,
    target_sample_size: usize,
    offset: FixedOffset,
    prayer_times: Arc<dyn PrayerTimeProvider>,
    festivals: Arc<dyn FestivalCalendar>,
}

impl CulturalPatternAnalyzer {
    pub fn new(
        config: &AdherenceConfig,
        prayer_times: Arc<dyn PrayerTimeProvider>,
        festivals: Arc<dyn FestivalCalendar>,
    ) -> Self {
        Self {
            config: config.cultural.clone(),
            target_sample_size: config.patterns.target_sample_size,
            offset: config.timezone.offset(),
            prayer_times,
            festivals,
        }
    }

    /// Analyze at the configured default location.
    pub fn analyze(
        &self,
        records: &[AdherenceRecord],
        patient_id: &str,
        family_support: &[FamilySupportEvent],
    ) -> CulturalPattern {
        let location = GeoPoint::new(self.config.default_latitude, self.config.default_longitude);
        self.analyze_at(records, patient_id, family_support, location)
    }

    pub fn analyze_at(
        &self,
        records: &[AdherenceRecord],
        patient_id: &str,
        family_support: &[FamilySupportEvent],
        location: GeoPoint,
    ) -> CulturalPattern {
        let relevant: Vec<&AdherenceRecord> = records
            .iter()
            .filter(|r| r.status.counts_toward_rate())
            .collect();

        let mut result = CulturalPattern {
            patient_id: patient_id.to_string(),
            total_records: relevant.len(),
            overall_rate: taken_rate(&relevant),
            ..Default::default()
        };
        if relevant.len() < self.config.min_total_records {
            tracing::debug!(
                patient_id,
                records = relevant.len(),
                "too few records for cultural analysis"
            );
            return result;
        }

        let festivals = self.festival_table(&relevant, patient_id);

        result.prayer_time_impact = self.prayer_impacts(&relevant, patient_id, location, result.overall_rate);
        result.festival_impact = self.festival_impacts(&relevant, &festivals, result.overall_rate);
        result.fasting_impact = self.fasting_impact(&relevant, &festivals, result.overall_rate);
        result.family_influence = self.family_influence(&relevant, family_support, result.overall_rate);

        self.summarize(&mut result, &relevant);
        result
    }

    fn confidence(&self, sample: usize) -> f64 {
        (sample as f64 / self.target_sample_size.max(1) as f64).min(1.0)
    }

    fn significant(&self, delta: f64) -> bool {
        delta.abs() >= self.config.significance_margin
    }

    fn local_date(&self, record: &AdherenceRecord) -> NaiveDate {
        time::local_date(record.scheduled_time, self.offset)
    }

    fn window(&self, prayer: Prayer) -> PrayerWindow {
        let w = &self.config.prayer_windows;
        match prayer {
            Prayer::Fajr => w.fajr,
            Prayer::Zuhr => w.zuhr,
            Prayer::Asr => w.asr,
            Prayer::Maghrib => w.maghrib,
            Prayer::Isya => w.isya,
        }
    }

    /// Prayer instants for one local date. `None` when the lookup failed.
    fn schedule_for(&self, date: NaiveDate, location: GeoPoint, patient_id: &str) -> Option<PrayerSchedule> {
        let times = match self
            .prayer_times
            .prayer_times(date, location.latitude, location.longitude)
        {
            Ok(t) => t,
            Err(e) => {
                events::calendar_lookup_failed(patient_id, "prayer_times", &e.to_string());
                return None;
            }
        };
        let mut schedule = Vec::with_capacity(Prayer::ALL.len());
        for prayer in Prayer::ALL {
            let raw = times.get(prayer);
            match time::parse_hh_mm(raw) {
                Some(t) => schedule.push((prayer, date.and_time(t))),
                None => {
                    let err = CalendarError::MalformedPrayerTime {
                        date,
                        prayer: prayer.to_string(),
                        value: raw.to_string(),
                    };
                    events::calendar_lookup_failed(patient_id, "prayer_times", &err.to_string());
                }
            }
        }
        Some(schedule)
    }

    fn prayer_impacts(
        &self,
        relevant: &[&AdherenceRecord],
        patient_id: &str,
        location: GeoPoint,
        overall: f64,
    ) -> Vec<PrayerTimeImpact> {
        let mut schedules: HashMap<NaiveDate, Option<PrayerSchedule>> = HashMap::new();
        let mut buckets: BTreeMap<Prayer, Vec<&AdherenceRecord>> = BTreeMap::new();

        for record in relevant {
            let date = self.local_date(record);
            let schedule = schedules
                .entry(date)
                .or_insert_with(|| self.schedule_for(date, location, patient_id));
            let Some(schedule) = schedule else {
                continue;
            };
            let local = record.scheduled_time.with_timezone(&self.offset).naive_local();
            for (prayer, at) in schedule.iter() {
                let w = self.window(*prayer);
                let from = *at - Duration::minutes(w.before_minutes);
                let to = *at + Duration::minutes(w.after_minutes);
                if local >= from && local <= to {
                    buckets.entry(*prayer).or_default().push(record);
                }
            }
        }

        buckets
            .into_iter()
            .filter(|(_, recs)| recs.len() >= self.config.min_bucket_records)
            .map(|(prayer, recs)| {
                let rate = taken_rate(&recs);
                let delta = math::round1(rate - overall);
                PrayerTimeImpact {
                    prayer,
                    records: recs.len(),
                    adherence_rate: rate,
                    delta,
                    significant: self.significant(delta),
                }
            })
            .collect()
    }

    /// Festivals for every year the records touch. The year before is added
    /// for January dates a December festival could still cover; a missing
    /// previous year is expected at the edge of a calendar's range.
    fn festival_table(&self, relevant: &[&AdherenceRecord], patient_id: &str) -> Vec<FestivalDate> {
        let mut current = BTreeSet::new();
        let mut previous = BTreeSet::new();
        for record in relevant {
            let date = self.local_date(record);
            current.insert(date.year());
            if date.ordinal() <= YEAR_CARRYOVER_DAYS {
                previous.insert(date.year() - 1);
            }
        }

        let mut table = Vec::new();
        for &year in current.union(&previous) {
            match self.festivals.festivals(year) {
                Ok(f) => table.extend(f),
                Err(e) if !current.contains(&year) => {
                    tracing::debug!(patient_id, year, error = %e, "previous-year festivals unavailable");
                }
                Err(e) => events::calendar_lookup_failed(patient_id, "festivals", &e.to_string()),
            }
        }
        table
    }

    fn festival_impacts(
        &self,
        relevant: &[&AdherenceRecord],
        festivals: &[FestivalDate],
        overall: f64,
    ) -> Vec<FestivalImpact> {
        festivals
            .iter()
            .filter(|f| !f.is_fasting_period)
            .filter_map(|festival| {
                let inside: Vec<&AdherenceRecord> = relevant
                    .iter()
                    .copied()
                    .filter(|r| festival.contains(self.local_date(r)))
                    .collect();
                if inside.len() < self.config.min_bucket_records {
                    return None;
                }
                let rate = taken_rate(&inside);
                let delta = math::round1(rate - overall);
                Some(FestivalImpact {
                    festival_name: festival.name.clone(),
                    cultural_group: festival.cultural_group.clone(),
                    records: inside.len(),
                    adherence_rate: rate,
                    delta,
                    significant: self.significant(delta),
                })
            })
            .collect()
    }

    fn fasting_impact(
        &self,
        relevant: &[&AdherenceRecord],
        festivals: &[FestivalDate],
        overall: f64,
    ) -> Option<FastingImpact> {
        let fasting_periods: Vec<&FestivalDate> =
            festivals.iter().filter(|f| f.is_fasting_period).collect();
        let fasting: Vec<&AdherenceRecord> = relevant
            .iter()
            .copied()
            .filter(|r| {
                r.during_fasting() || {
                    let date = self.local_date(r);
                    fasting_periods.iter().any(|f| f.contains(date))
                }
            })
            .collect();
        if fasting.len() < self.config.min_bucket_records {
            return None;
        }
        let rate = taken_rate(&fasting);
        let delta = math::round1(rate - overall);
        Some(FastingImpact {
            records: fasting.len(),
            adherence_rate: rate,
            delta,
            significant: self.significant(delta),
        })
    }

    fn family_influence(
        &self,
        relevant: &[&AdherenceRecord],
        family_support: &[FamilySupportEvent],
        overall: f64,
    ) -> Option<FamilyInfluence> {
        if family_support.is_empty() {
            return None;
        }
        let support_days: BTreeSet<NaiveDate> = family_support
            .iter()
            .map(|e| time::local_date(e.occurred_at, self.offset))
            .collect();
        let supported: Vec<&AdherenceRecord> = relevant
            .iter()
            .copied()
            .filter(|r| support_days.contains(&self.local_date(r)))
            .collect();
        if supported.len() < self.config.min_bucket_records {
            return None;
        }
        let rate = taken_rate(&supported);
        let delta = math::round1(rate - overall);
        Some(FamilyInfluence {
            supported_days: support_days.len(),
            supported_records: supported.len(),
            supported_rate: rate,
            delta,
            significant: self.significant(delta),
        })
    }

    fn pattern(
        &self,
        pattern_type: PatternType,
        delta: f64,
        sample: usize,
        description: String,
        factors: Vec<String>,
        medications: Vec<String>,
    ) -> AdherencePattern {
        AdherencePattern {
            pattern_type,
            impact: if delta < 0.0 {
                PatternImpact::Negative
            } else {
                PatternImpact::Positive
            },
            description,
            confidence: self.confidence(sample),
            occurrences: sample,
            metric: delta,
            affected_medications: medications,
            recommendations: recommendations::owned(pattern_type),
            cultural_factors: factors,
        }
    }

    /// Turn significant buckets into patterns, insights and recommendations.
    fn summarize(&self, result: &mut CulturalPattern, relevant: &[&AdherenceRecord]) {
        let medications: Vec<String> = relevant
            .iter()
            .map(|r| r.medication_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let direction = |delta: f64| if delta < 0.0 { "lower" } else { "higher" };

        let mut patterns = Vec::new();
        let mut insights = Vec::new();

        for p in result.prayer_time_impact.iter().filter(|p| p.significant) {
            insights.push(format!(
                "Doses near {} prayer show {} adherence ({:.1}% vs {:.1}% overall)",
                p.prayer,
                direction(p.delta),
                p.adherence_rate,
                result.overall_rate
            ));
            patterns.push(self.pattern(
                PatternType::PrayerTimeImpact,
                p.delta,
                p.records,
                format!("Adherence near {} differs by {:+.1} points", p.prayer, p.delta),
                vec![format!("prayer:{}", p.prayer)],
                medications.clone(),
            ));
        }

        for f in result.festival_impact.iter().filter(|f| f.significant) {
            insights.push(format!(
                "During {} adherence was {} ({:.1}% vs {:.1}% overall)",
                f.festival_name,
                direction(f.delta),
                f.adherence_rate,
                result.overall_rate
            ));
            patterns.push(self.pattern(
                PatternType::FestivalDisruption,
                f.delta,
                f.records,
                format!("{} coincides with a {:+.1} point change", f.festival_name, f.delta),
                vec![format!("festival:{}", f.festival_name), format!("group:{}", f.cultural_group)],
                medications.clone(),
            ));
        }

        if let Some(f) = result.fasting_impact.as_ref().filter(|f| f.significant) {
            insights.push(format!(
                "Fasting days show {} adherence ({:.1}% vs {:.1}% overall)",
                direction(f.delta),
                f.adherence_rate,
                result.overall_rate
            ));
            patterns.push(self.pattern(
                PatternType::FastingAdjustment,
                f.delta,
                f.records,
                format!("Fasting periods coincide with a {:+.1} point change", f.delta),
                vec!["fasting".to_string()],
                medications.clone(),
            ));
        }

        if let Some(f) = result.family_influence.as_ref().filter(|f| f.significant) {
            insights.push(format!(
                "Days with family support show {} adherence ({:.1}% vs {:.1}% overall)",
                direction(f.delta),
                f.supported_rate,
                result.overall_rate
            ));
            patterns.push(self.pattern(
                PatternType::FamilySupportEffect,
                f.delta,
                f.supported_records,
                format!("Family support days coincide with a {:+.1} point change", f.delta),
                vec!["family_support".to_string()],
                medications.clone(),
            ));
        }

        patterns.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then(a.pattern_type.cmp(&b.pattern_type))
        });

        let mut seen = BTreeSet::new();
        result.recommendations = patterns
            .iter()
            .flat_map(|p| p.recommendations.iter().cloned())
            .filter(|r| seen.insert(r.clone()))
            .collect();

        for p in &patterns {
            events::pattern_detected(p.pattern_type.as_str(), p.confidence, p.occurrences);
        }
        result.insights = insights;
        result.patterns = patterns;
    }
}
