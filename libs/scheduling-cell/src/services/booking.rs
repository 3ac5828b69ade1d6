// libs/scheduling-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_store::{AppointmentStore, CountFilter, NewAppointment, RecordField, StoreError};

use crate::models::{
    AvailableSlotResponse, CreateAppointmentRequest, SchedulingError, UpdateAppointmentRequest,
};
use crate::services::conflict::ConflictDetector;
use crate::services::identifier::{self, MAX_ID_ATTEMPTS};
use crate::services::lifecycle::LifecycleService;
use crate::services::{slots, validate};

/// Orchestrates creation, mutation and querying of appointments. The only
/// component with business-rule authority; transports stay thin wrappers
/// around it.
pub struct SchedulingService {
    store: Arc<dyn AppointmentStore>,
    conflict: ConflictDetector,
    lifecycle: LifecycleService,
}

impl SchedulingService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        let conflict = ConflictDetector::new(Arc::clone(&store));
        Self {
            store,
            conflict,
            lifecycle: LifecycleService::new(),
        }
    }

    /// Create a new appointment. Checks run in fixed order and the first
    /// failure short-circuits: field validation, business hours, minimum
    /// duration, conflict, then insert with bounded id-collision retries.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            "Booking appointment for patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        let request = self.validate_create_request(request)?;

        if !slots::within_business_hours(request.start_time, request.end_time) {
            return Err(SchedulingError::BusinessRule(
                "Appointment must be scheduled within business hours (9 AM - 6 PM)".to_string(),
            ));
        }

        if !slots::meets_minimum_duration(request.start_time, request.end_time) {
            return Err(SchedulingError::Validation(format!(
                "Appointment duration must be at least {} minutes",
                slots::MIN_DURATION_MINUTES
            )));
        }

        if self
            .conflict
            .has_conflict(
                &request.doctor_id,
                request.appointment_date,
                request.start_time,
                request.end_time,
                None,
            )
            .await?
        {
            return Err(SchedulingError::Conflict(format!(
                "Doctor {} already has an appointment during this time slot",
                request.doctor_id
            )));
        }

        let year = identifier::current_year();
        let mut booking_id = match self
            .store
            .count_booking_id_prefix(&identifier::booking_id_prefix(year))
            .await
        {
            Ok(count) => identifier::next_booking_id(year, count),
            Err(err) => {
                warn!("Booking id count query failed ({}), using fallback", err);
                identifier::fallback_booking_id(year)
            }
        };

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let record = NewAppointment {
                booking_id: booking_id.clone(),
                doctor_id: request.doctor_id.clone(),
                patient_id: request.patient_id.clone(),
                facility_id: request.facility_id.clone(),
                doctor_name: request.doctor_name.clone(),
                patient_name: request.patient_name.clone(),
                appointment_date: request.appointment_date,
                start_time: request.start_time,
                end_time: request.end_time,
                purpose_of_visit: request.purpose_of_visit.clone(),
                description: request.description.clone(),
                status: AppointmentStatus::Scheduled,
                created_at: Utc::now(),
            };

            match self.store.insert(record).await {
                Ok(created) => {
                    info!(
                        "Appointment {} booked for doctor {} on {}",
                        created.booking_id, created.doctor_id, created.appointment_date
                    );
                    return Ok(created);
                }
                Err(StoreError::UniqueViolation { .. }) => {
                    booking_id = identifier::retry_booking_id(year);
                    warn!(
                        "Booking id collision, retrying with {} (attempt {}/{})",
                        booking_id, attempt, MAX_ID_ATTEMPTS
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(SchedulingError::Conflict(format!(
            "Failed to generate a unique booking id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Point lookup by booking id.
    pub async fn get(&self, booking_id: &str) -> Result<Appointment, SchedulingError> {
        debug!("Fetching appointment {}", booking_id);
        self.store
            .find_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| SchedulingError::NotFound(booking_id.to_string()))
    }

    /// Page through all appointments in insertion order; the total reflects
    /// the unfiltered table size.
    pub async fn list(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<Appointment>, usize), SchedulingError> {
        Ok(self.store.list(skip, limit).await?)
    }

    pub async fn list_by_doctor(
        &self,
        doctor_id: &str,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self
            .store
            .find_by_field(RecordField::DoctorId, doctor_id)
            .await?)
    }

    pub async fn list_by_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self
            .store
            .find_by_field(RecordField::PatientId, patient_id)
            .await?)
    }

    pub async fn list_by_facility(
        &self,
        facility_id: &str,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        Ok(self
            .store
            .find_by_field(RecordField::FacilityId, facility_id)
            .await?)
    }

    /// Apply a status transition and stamp `updated_at`.
    pub async fn update_status(
        &self,
        booking_id: &str,
        requested: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        let mut record = self.get(booking_id).await?;

        self.lifecycle.validate_transition(record.status, requested)?;

        record.status = requested;
        record.updated_at = Some(Utc::now());
        let updated = self.store.update(record).await?;

        info!("Appointment {} moved to status {}", booking_id, requested);
        Ok(updated)
    }

    /// Apply a partial update. When the patch touches date or times, the
    /// booked interval is re-validated and re-checked for conflicts with the
    /// record's own row excluded.
    pub async fn update_fields(
        &self,
        booking_id: &str,
        patch: UpdateAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        debug!("Updating appointment {}", booking_id);

        let mut record = self.get(booking_id).await?;
        let reschedule = patch.touches_schedule();

        if let Some(doctor_id) = patch.doctor_id {
            validate::reference_id("doctor_id", "DOC", &doctor_id)?;
            record.doctor_id = doctor_id;
        }
        if let Some(patient_id) = patch.patient_id {
            validate::reference_id("patient_id", "PAT", &patient_id)?;
            record.patient_id = patient_id;
        }
        if let Some(facility_id) = patch.facility_id {
            validate::reference_id("facility_id", "FAC", &facility_id)?;
            record.facility_id = facility_id;
        }
        if let Some(doctor_name) = patch.doctor_name {
            record.doctor_name = validate::display_name("doctor_name", &doctor_name)?;
        }
        if let Some(patient_name) = patch.patient_name {
            record.patient_name = validate::display_name("patient_name", &patient_name)?;
        }
        if let Some(date) = patch.appointment_date {
            validate::not_in_past(date)?;
            record.appointment_date = date;
        }
        if let Some(start_time) = patch.start_time {
            record.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            record.end_time = end_time;
        }
        if let Some(purpose) = patch.purpose_of_visit {
            validate::purpose_of_visit(&purpose)?;
            record.purpose_of_visit = purpose;
        }
        if let Some(text) = patch.description {
            validate::description(Some(&text))?;
            record.description = Some(text);
        }

        if reschedule {
            if !slots::within_business_hours(record.start_time, record.end_time) {
                return Err(SchedulingError::BusinessRule(
                    "Appointment must be scheduled within business hours (9 AM - 6 PM)"
                        .to_string(),
                ));
            }
            if !slots::meets_minimum_duration(record.start_time, record.end_time) {
                return Err(SchedulingError::Validation(format!(
                    "Appointment duration must be at least {} minutes",
                    slots::MIN_DURATION_MINUTES
                )));
            }
            if self
                .conflict
                .has_conflict(
                    &record.doctor_id,
                    record.appointment_date,
                    record.start_time,
                    record.end_time,
                    Some(record.sequence_id),
                )
                .await?
            {
                return Err(SchedulingError::Conflict(format!(
                    "Doctor {} already has an appointment during this time slot",
                    record.doctor_id
                )));
            }
        }

        record.updated_at = Some(Utc::now());
        let updated = self.store.update(record).await?;

        info!("Appointment {} updated", booking_id);
        Ok(updated)
    }

    /// Hard delete. Not-found is an error so the transport can answer 404.
    pub async fn delete(&self, booking_id: &str) -> Result<bool, SchedulingError> {
        // Lookup first so a missing record is reported as NotFound rather
        // than a silent false.
        self.get(booking_id).await?;
        let removed = self.store.delete(booking_id).await?;
        if removed {
            info!("Appointment {} deleted", booking_id);
        }
        Ok(removed)
    }

    pub async fn count_by_status(
        &self,
        status: AppointmentStatus,
    ) -> Result<usize, SchedulingError> {
        let filter = CountFilter {
            status: Some(status),
            ..CountFilter::default()
        };
        Ok(self.store.count(&filter).await?)
    }

    pub async fn count_by_doctor(
        &self,
        doctor_id: &str,
        status: Option<AppointmentStatus>,
    ) -> Result<usize, SchedulingError> {
        let filter = CountFilter {
            status,
            doctor_id: Some(doctor_id.to_string()),
            ..CountFilter::default()
        };
        Ok(self.store.count(&filter).await?)
    }

    pub async fn count_by_patient(
        &self,
        patient_id: &str,
        status: Option<AppointmentStatus>,
    ) -> Result<usize, SchedulingError> {
        let filter = CountFilter {
            status,
            patient_id: Some(patient_id.to_string()),
            ..CountFilter::default()
        };
        Ok(self.store.count(&filter).await?)
    }

    /// Free 30-minute slots for a doctor on a date. Fails soft: any internal
    /// failure degrades to an empty list so this read-only convenience call
    /// never turns fatal for the caller.
    pub async fn available_slots(
        &self,
        doctor_id: &str,
        date: chrono::NaiveDate,
    ) -> Vec<AvailableSlotResponse> {
        let booked = match self.store.find_by_doctor_date_active(doctor_id, date).await {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "Slot lookup for doctor {} on {} failed ({}), returning no slots",
                    doctor_id, date, err
                );
                return Vec::new();
            }
        };

        let intervals: Vec<_> = booked
            .iter()
            .map(|record| (record.start_time, record.end_time))
            .collect();

        slots::enumerate_free_slots(&intervals)
            .into_iter()
            .map(|slot| AvailableSlotResponse {
                date,
                start_time: slot.start,
                end_time: slot.end,
            })
            .collect()
    }

    fn validate_create_request(
        &self,
        mut request: CreateAppointmentRequest,
    ) -> Result<CreateAppointmentRequest, SchedulingError> {
        validate::reference_id("doctor_id", "DOC", &request.doctor_id)?;
        validate::reference_id("patient_id", "PAT", &request.patient_id)?;
        validate::reference_id("facility_id", "FAC", &request.facility_id)?;
        request.doctor_name = validate::display_name("doctor_name", &request.doctor_name)?;
        request.patient_name = validate::display_name("patient_name", &request.patient_name)?;
        validate::purpose_of_visit(&request.purpose_of_visit)?;
        validate::description(request.description.as_deref())?;
        validate::not_in_past(request.appointment_date)?;
        if request.end_time <= request.start_time {
            return Err(SchedulingError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(request)
    }
}
