use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use shared_models::appointment::Appointment;

use crate::{AppointmentStore, CountFilter, NewAppointment, RecordField, StoreError};

/// In-memory storage adapter. Records live in insertion order behind a
/// single `RwLock`; every mutating operation runs under one write guard, so
/// partial writes are never observable.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    records: Vec<Appointment>,
    next_sequence_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                next_sequence_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn insert(&self, record: NewAppointment) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.write().await;

        if inner
            .records
            .iter()
            .any(|existing| existing.booking_id == record.booking_id)
        {
            return Err(StoreError::UniqueViolation {
                field: "booking_id",
            });
        }

        let sequence_id = inner.next_sequence_id;
        inner.next_sequence_id += 1;

        let appointment = Appointment {
            sequence_id,
            booking_id: record.booking_id,
            doctor_id: record.doctor_id,
            patient_id: record.patient_id,
            facility_id: record.facility_id,
            doctor_name: record.doctor_name,
            patient_name: record.patient_name,
            appointment_date: record.appointment_date,
            start_time: record.start_time,
            end_time: record.end_time,
            purpose_of_visit: record.purpose_of_visit,
            description: record.description,
            status: record.status,
            created_at: record.created_at,
            updated_at: None,
        };

        debug!(
            "Inserted appointment {} (sequence {})",
            appointment.booking_id, sequence_id
        );
        inner.records.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_by_booking_id(
        &self,
        booking_id: &str,
    ) -> Result<Option<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .find(|record| record.booking_id == booking_id)
            .cloned())
    }

    async fn find_by_field(
        &self,
        field: RecordField,
        value: &str,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        let matches = inner
            .records
            .iter()
            .filter(|record| match field {
                RecordField::DoctorId => record.doctor_id == value,
                RecordField::PatientId => record.patient_id == value,
                RecordField::FacilityId => record.facility_id == value,
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn find_by_doctor_date_active(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read().await;
        let matches = inner
            .records
            .iter()
            .filter(|record| {
                record.doctor_id == doctor_id
                    && record.appointment_date == date
                    && record.status.is_active()
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn list(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<Appointment>, usize), StoreError> {
        let inner = self.inner.read().await;
        let total = inner.records.len();
        let page = inner
            .records
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update(&self, record: Appointment) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .records
            .iter_mut()
            .find(|existing| existing.sequence_id == record.sequence_id)
            .ok_or_else(|| {
                StoreError::Backend(format!(
                    "update target with sequence id {} no longer exists",
                    record.sequence_id
                ))
            })?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, booking_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|record| record.booking_id != booking_id);
        Ok(inner.records.len() < before)
    }

    async fn count(&self, filter: &CountFilter) -> Result<usize, StoreError> {
        let inner = self.inner.read().await;
        let count = inner
            .records
            .iter()
            .filter(|record| {
                filter.status.map_or(true, |status| record.status == status)
                    && filter
                        .doctor_id
                        .as_deref()
                        .map_or(true, |id| record.doctor_id == id)
                    && filter
                        .patient_id
                        .as_deref()
                        .map_or(true, |id| record.patient_id == id)
            })
            .count();
        Ok(count)
    }

    async fn count_booking_id_prefix(&self, prefix: &str) -> Result<usize, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .iter()
            .filter(|record| record.booking_id.starts_with(prefix))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use shared_models::appointment::AppointmentStatus;

    fn sample_record(booking_id: &str) -> NewAppointment {
        NewAppointment {
            booking_id: booking_id.to_string(),
            doctor_id: "DOC-2025-0001".to_string(),
            patient_id: "PAT-2025-0001".to_string(),
            facility_id: "FAC-2025-0001".to_string(),
            doctor_name: "Dr. Alice Osei".to_string(),
            patient_name: "Ben Carter".to_string(),
            appointment_date: Utc::now().date_naive(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            purpose_of_visit: "Check-up".to_string(),
            description: None,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_sequence_ids() {
        let store = MemoryStore::new();
        let first = store.insert(sample_record("APT-2025-0001")).await.unwrap();
        let second = store.insert(sample_record("APT-2025-0002")).await.unwrap();
        assert_eq!(first.sequence_id, 1);
        assert_eq!(second.sequence_id, 2);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_booking_id() {
        let store = MemoryStore::new();
        store.insert(sample_record("APT-2025-0001")).await.unwrap();
        let err = store
            .insert(sample_record("APT-2025-0001"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::UniqueViolation {
                field: "booking_id"
            }
        ));
    }

    #[tokio::test]
    async fn sequence_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        store.insert(sample_record("APT-2025-0001")).await.unwrap();
        assert!(store.delete("APT-2025-0001").await.unwrap());
        let next = store.insert(sample_record("APT-2025-0002")).await.unwrap();
        assert_eq!(next.sequence_id, 2);
    }

    #[tokio::test]
    async fn list_reports_unfiltered_total() {
        let store = MemoryStore::new();
        for n in 1..=5 {
            store
                .insert(sample_record(&format!("APT-2025-{:04}", n)))
                .await
                .unwrap();
        }
        let (page, total) = store.list(2, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].booking_id, "APT-2025-0003");
    }

    #[tokio::test]
    async fn active_lookup_skips_terminal_statuses() {
        let store = MemoryStore::new();
        let created = store.insert(sample_record("APT-2025-0001")).await.unwrap();
        let mut cancelled = created.clone();
        cancelled.status = AppointmentStatus::Cancelled;
        store.update(cancelled).await.unwrap();

        let active = store
            .find_by_doctor_date_active("DOC-2025-0001", created.appointment_date)
            .await
            .unwrap();
        assert!(active.is_empty());
    }
}
