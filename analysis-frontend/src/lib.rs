pub mod api;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod nav_config;
pub mod services;
pub mod startup;

use std::sync::Arc;

use frontend_core::session::AuthExpiryGuard;
use services::api_client::ApiClient;

/// Shared application state: the API client and the auth-expiry guard that
/// deduplicates session termination across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub expiry_guard: Arc<AuthExpiryGuard>,
}

impl AppState {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            expiry_guard: Arc::new(AuthExpiryGuard::new()),
        }
    }
}
