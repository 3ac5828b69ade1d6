//! Storage gateway for appointment records.
//!
//! The scheduling core talks to durable storage exclusively through the
//! [`AppointmentStore`] trait; [`MemoryStore`] is the in-process adapter.
//! A SQL-backed adapter would implement the same trait and signal duplicate
//! booking ids through [`StoreError::UniqueViolation`] exactly like the
//! in-memory one does.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shared_models::appointment::{Appointment, AppointmentStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: &'static str },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Record fields usable for exact-match predicate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    DoctorId,
    PatientId,
    FacilityId,
}

/// Conjunctive count predicate; `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CountFilter {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
}

/// An appointment record ready for insertion; the store assigns the
/// monotonic `sequence_id`.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub booking_id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub facility_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub appointment_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub purpose_of_visit: String,
    pub description: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::UniqueViolation`] when
    /// the booking id is already taken; the uniqueness check and the append
    /// happen atomically.
    async fn insert(&self, record: NewAppointment) -> Result<Appointment, StoreError>;

    async fn find_by_booking_id(&self, booking_id: &str)
        -> Result<Option<Appointment>, StoreError>;

    async fn find_by_field(
        &self,
        field: RecordField,
        value: &str,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// All records for a doctor on a date whose status occupies the calendar
    /// (SCHEDULED or PENDING).
    async fn find_by_doctor_date_active(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Page through records in insertion order; the returned total is the
    /// unfiltered table size.
    async fn list(&self, skip: usize, limit: usize)
        -> Result<(Vec<Appointment>, usize), StoreError>;

    /// Replace the stored record matching `record.sequence_id`.
    async fn update(&self, record: Appointment) -> Result<Appointment, StoreError>;

    /// Hard delete; returns whether a record existed.
    async fn delete(&self, booking_id: &str) -> Result<bool, StoreError>;

    async fn count(&self, filter: &CountFilter) -> Result<usize, StoreError>;

    /// Count records whose booking id starts with `prefix`; drives the
    /// per-year identifier sequence.
    async fn count_booking_id_prefix(&self, prefix: &str) -> Result<usize, StoreError>;
}
