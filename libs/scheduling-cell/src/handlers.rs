// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_models::appointment::AppointmentStatus;
use shared_models::error::AppError;

use crate::models::{
    AppointmentListResponse, CountResponse, CreateAppointmentRequest, SchedulingError,
    StatusUpdateRequest, UpdateAppointmentRequest,
};
use crate::services::SchedulingService;
use crate::AppState;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub doctor_id: String,
    pub date: NaiveDate,
}

fn scheduling_service(state: &AppState) -> SchedulingService {
    SchedulingService::new(Arc::clone(&state.store))
}

/// Translate core errors 1:1 into client-visible outcomes. Storage failures
/// stay opaque; the detail is logged, not exposed.
fn map_scheduling_error(err: SchedulingError) -> AppError {
    match err {
        SchedulingError::NotFound(msg) => AppError::NotFound(format!(
            "Appointment with ID {} not found",
            msg
        )),
        SchedulingError::Conflict(msg) => AppError::Conflict(msg),
        SchedulingError::Validation(msg) => AppError::Unprocessable(msg),
        SchedulingError::BusinessRule(msg) => AppError::BadRequest(msg),
        SchedulingError::Storage(msg) => {
            tracing::error!("Storage failure: {}", msg);
            AppError::Internal("Internal storage failure".to_string())
        }
    }
}

// ==============================================================================
// APPOINTMENT CRUD HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 1 || limit > MAX_LIMIT {
        return Err(AppError::Unprocessable(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    let (appointments, total) = scheduling_service(&state)
        .list(skip, limit)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(AppointmentListResponse {
        appointments,
        total,
        skip,
        limit,
    }))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = scheduling_service(&state)
        .create(request)
        .await
        .map_err(map_scheduling_error)?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduling_service(&state)
        .get(&booking_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(patch): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduling_service(&state)
        .update_fields(&booking_id, patch)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = scheduling_service(&state)
        .update_status(&booking_id, request.status)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = scheduling_service(&state)
        .delete(&booking_id)
        .await
        .map_err(map_scheduling_error)?;

    if !removed {
        return Err(AppError::NotFound(format!(
            "Appointment with ID {} not found",
            booking_id
        )));
    }

    Ok(Json(json!({
        "message": "Appointment deleted successfully",
        "booking_id": booking_id
    })))
}

// ==============================================================================
// LISTING AND COUNT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduling_service(&state)
        .list_by_patient(&patient_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduling_service(&state)
        .list_by_doctor(&doctor_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_facility_appointments(
    State(state): State<Arc<AppState>>,
    Path(facility_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointments = scheduling_service(&state)
        .list_by_facility(&facility_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_scheduled_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    status_count(&state, AppointmentStatus::Scheduled).await
}

#[axum::debug_handler]
pub async fn get_pending_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    status_count(&state, AppointmentStatus::Pending).await
}

#[axum::debug_handler]
pub async fn get_completed_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    status_count(&state, AppointmentStatus::Completed).await
}

#[axum::debug_handler]
pub async fn get_cancelled_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CountResponse>, AppError> {
    status_count(&state, AppointmentStatus::Cancelled).await
}

async fn status_count(
    state: &AppState,
    status: AppointmentStatus,
) -> Result<Json<CountResponse>, AppError> {
    let count = scheduling_service(state)
        .count_by_status(status)
        .await
        .map_err(map_scheduling_error)?;
    Ok(Json(CountResponse { count }))
}

#[axum::debug_handler]
pub async fn get_doctor_status_count(
    State(state): State<Arc<AppState>>,
    Path((doctor_id, status)): Path<(String, AppointmentStatus)>,
) -> Result<Json<CountResponse>, AppError> {
    let count = scheduling_service(&state)
        .count_by_doctor(&doctor_id, Some(status))
        .await
        .map_err(map_scheduling_error)?;
    Ok(Json(CountResponse { count }))
}

#[axum::debug_handler]
pub async fn get_patient_status_count(
    State(state): State<Arc<AppState>>,
    Path((patient_id, status)): Path<(String, AppointmentStatus)>,
) -> Result<Json<CountResponse>, AppError> {
    let count = scheduling_service(&state)
        .count_by_patient(&patient_id, Some(status))
        .await
        .map_err(map_scheduling_error)?;
    Ok(Json(CountResponse { count }))
}

// ==============================================================================
// AVAILABILITY HANDLER
// ==============================================================================

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    // Fail-soft by design: this endpoint never surfaces internal errors.
    let slots = scheduling_service(&state)
        .available_slots(&query.doctor_id, query.date)
        .await;

    Ok(Json(json!(slots)))
}
