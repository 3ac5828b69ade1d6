use std::sync::Arc;

use axum::{routing::get, Router};

use scheduling_cell::router::appointment_routes;
use scheduling_cell::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "MedSched API is running!" }))
        .nest("/api/appointments", appointment_routes(state))
}
