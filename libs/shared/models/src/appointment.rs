use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A booked appointment as persisted by the storage gateway.
///
/// `sequence_id` is the storage-assigned primary key and never leaves the
/// service boundary except inside conflict-exclusion filters. `booking_id`
/// (`APT-YYYY-NNNN`) is the external handle and is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub sequence_id: i64,
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
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Active statuses occupy a doctor's calendar and count for conflicts.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Pending
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "SCHEDULED"),
            AppointmentStatus::Pending => write!(f, "PENDING"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}
