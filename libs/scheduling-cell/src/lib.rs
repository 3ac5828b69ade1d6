pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use std::sync::Arc;

use shared_config::AppConfig;
use shared_store::AppointmentStore;

/// Shared state handed to every handler: configuration plus the storage
/// gateway the scheduling service runs against.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn AppointmentStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn AppointmentStore>) -> Self {
        Self { config, store }
    }
}
