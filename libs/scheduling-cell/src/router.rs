// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/", post(handlers::create_appointment))
        // Static routes before the booking-id capture
        .route("/count/scheduled", get(handlers::get_scheduled_count))
        .route("/count/pending", get(handlers::get_pending_count))
        .route("/count/completed", get(handlers::get_completed_count))
        .route("/count/cancelled", get(handlers::get_cancelled_count))
        .route("/slots/available", get(handlers::get_available_slots))
        // Listings by foreign reference
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route(
            "/patients/{patient_id}/count/{status}",
            get(handlers::get_patient_status_count),
        )
        .route("/doctors/{doctor_id}", get(handlers::get_doctor_appointments))
        .route(
            "/doctors/{doctor_id}/count/{status}",
            get(handlers::get_doctor_status_count),
        )
        .route(
            "/facilities/{facility_id}",
            get(handlers::get_facility_appointments),
        )
        // Booking-id routes
        .route("/{booking_id}", get(handlers::get_appointment))
        .route("/{booking_id}", put(handlers::update_appointment))
        .route("/{booking_id}", delete(handlers::delete_appointment))
        .route(
            "/{booking_id}/status",
            put(handlers::update_appointment_status),
        )
        .with_state(state)
}
