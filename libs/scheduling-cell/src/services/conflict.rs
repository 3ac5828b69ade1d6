// libs/scheduling-cell/src/services/conflict.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use shared_store::AppointmentStore;

use crate::models::SchedulingError;
use crate::services::slots;

/// Detects double-bookings for a doctor on a given date.
///
/// The check is check-then-act: under concurrent creation for the same slot
/// both checks may pass before either write commits. A storage-level
/// constraint scoped to (doctor_id, date, interval) is the recommended
/// hardening for adapters that can express one.
pub struct ConflictDetector {
    store: Arc<dyn AppointmentStore>,
}

impl ConflictDetector {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// True when the proposed interval overlaps any active (SCHEDULED or
    /// PENDING) booking for the doctor on that date. `exclude_sequence_id`
    /// lets update-in-place checks skip the record being updated.
    pub async fn has_conflict(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude_sequence_id: Option<i64>,
    ) -> Result<bool, SchedulingError> {
        debug!(
            "Checking conflicts for doctor {} on {} from {} to {}",
            doctor_id, date, start, end
        );

        let booked = self
            .store
            .find_by_doctor_date_active(doctor_id, date)
            .await?;

        let conflict = booked
            .iter()
            .filter(|record| {
                exclude_sequence_id.map_or(true, |id| record.sequence_id != id)
            })
            .any(|record| slots::overlaps(start, end, record.start_time, record.end_time));

        if conflict {
            warn!(
                "Conflict detected for doctor {} on {} at {}-{}",
                doctor_id, date, start, end
            );
        }

        Ok(conflict)
    }
}
