//! Record builders anchored on Malaysia time (UTC+08:00).

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use adherence_core::models::{
    AdherenceRecord, AdherenceStatus, CulturalContext, MealTiming, RecordMethod,
};

/// Malaysia Time offset.
pub fn myt() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("+08:00 is a valid offset")
}

/// A local Malaysia wall-clock time as a UTC instant.
pub fn myt_instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    myt()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid local time")
        .with_timezone(&Utc)
}

/// Fluent builder for `AdherenceRecord`.
///
/// Taken-state records get a taken time matching their status unless one is
/// set explicitly: on time at the schedule, late by 90 minutes, early by 30.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: AdherenceRecord,
    taken_offset: Option<i64>,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: AdherenceRecord::new(
                id,
                "patient-1",
                "med-1",
                myt_instant(2025, 3, 3, 8, 0),
            ),
            taken_offset: None,
        }
    }

    pub fn patient(mut self, patient_id: &str) -> Self {
        self.record.patient_id = patient_id.to_string();
        self
    }

    pub fn medication(mut self, medication_id: &str) -> Self {
        self.record.medication_id = medication_id.to_string();
        self
    }

    pub fn scheduled(mut self, at: DateTime<Utc>) -> Self {
        self.record.scheduled_time = at;
        self.record.updated_at = at;
        self
    }

    pub fn status(mut self, status: AdherenceStatus) -> Self {
        self.record.status = status;
        self
    }

    /// Taken `minutes` after the schedule (negative for early).
    pub fn taken_after(mut self, minutes: i64) -> Self {
        self.taken_offset = Some(minutes);
        self
    }

    pub fn delay(mut self, minutes: i64) -> Self {
        self.record.delay_minutes = Some(minutes);
        self
    }

    pub fn during_prayer(mut self) -> Self {
        self.context().is_during_prayer = Some(true);
        self
    }

    pub fn during_fasting(mut self) -> Self {
        self.context().is_during_fasting = Some(true);
        self
    }

    pub fn meal(mut self, timing: MealTiming) -> Self {
        self.context().meal_timing = Some(timing);
        self
    }

    pub fn method(mut self, method: RecordMethod) -> Self {
        self.record.method = method;
        self
    }

    /// Reminder delivered `minutes` before the schedule.
    pub fn reminder_before(mut self, minutes: i64) -> Self {
        self.record.reminder_sent_at = Some(self.record.scheduled_time - Duration::minutes(minutes));
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.record.notes.push(note.to_string());
        self
    }

    pub fn score(mut self, score: u8) -> Self {
        self.record.adherence_score = score;
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.record.updated_at = at;
        self
    }

    pub fn build(self) -> AdherenceRecord {
        let mut record = self.record;
        if record.status.requires_taken_time() {
            let offset = self.taken_offset.unwrap_or(match record.status {
                AdherenceStatus::TakenLate => 90,
                AdherenceStatus::TakenEarly => -30,
                _ => 0,
            });
            record.taken_time = Some(record.scheduled_time + Duration::minutes(offset));
        } else {
            record.taken_time = None;
        }
        record
    }

    fn context(&mut self) -> &mut CulturalContext {
        self.record
            .cultural_context
            .get_or_insert_with(CulturalContext::default)
    }
}

/// One record per consecutive day at `hour`:00 local time, statuses in order.
pub fn daily_records(
    patient_id: &str,
    medication_id: &str,
    first_day: NaiveDate,
    hour: u32,
    statuses: &[AdherenceStatus],
) -> Vec<AdherenceRecord> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let day = first_day + Duration::days(i as i64);
            let at = myt()
                .from_local_datetime(&day.and_hms_opt(hour, 0, 0).expect("valid hour"))
                .single()
                .expect("fixed offsets are unambiguous")
                .with_timezone(&Utc);
            RecordBuilder::new(format!("{medication_id}-{day}-{hour:02}"))
                .patient(patient_id)
                .medication(medication_id)
                .scheduled(at)
                .status(*status)
                .build()
        })
        .collect()
}
