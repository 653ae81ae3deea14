/// Shared application state
use crate::services::AuthService;
use soundcheck_core::storage::StorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StorageContext>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn StorageContext>, auth_service: Arc<AuthService>) -> Self {
        Self {
            store,
            auth_service,
        }
    }
}
