// libs/scheduling-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_store::StoreError;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
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
}

/// Explicit patch: only fields that are present are applied. Status changes
/// go through the dedicated status endpoint and are deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub facility_id: Option<String>,
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub purpose_of_visit: Option<String>,
    pub description: Option<String>,
}

impl UpdateAppointmentRequest {
    /// Whether the patch touches the booked interval and needs a fresh
    /// conflict check.
    pub fn touches_schedule(&self) -> bool {
        self.appointment_date.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AvailableSlotResponse {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

/// Closed error taxonomy of the scheduling core. The transport layer maps
/// each variant to a distinct client-visible outcome; `Storage` is the only
/// one that stays opaque to callers.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("Appointment with ID {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for SchedulingError {
    fn from(err: StoreError) -> Self {
        SchedulingError::Storage(err.to_string())
    }
}
