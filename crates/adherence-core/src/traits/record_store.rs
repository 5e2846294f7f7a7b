use crate::errors::StoreError;
use crate::models::AdherenceRecord;

/// The event store holding authoritative adherence records.
pub trait RecordStore: Send + Sync {
    /// Fetch the stored record with this id, if any.
    fn get(&self, record_id: &str) -> Result<Option<AdherenceRecord>, StoreError>;

    /// Insert or replace a record.
    fn put(&self, record: &AdherenceRecord) -> Result<(), StoreError>;

    /// All records for a patient/medication pair, ordered by scheduled time.
    fn records_for(
        &self,
        patient_id: &str,
        medication_id: &str,
    ) -> Result<Vec<AdherenceRecord>, StoreError>;
}
