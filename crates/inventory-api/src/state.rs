//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use inventory_auth::{AccessPolicy, AuthenticationGate, LoginAuthenticator};
use inventory_core::config::AppConfig;
use inventory_service::{CategoryService, ProductService};

/// Shared application state, cloned cheaply into every request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Per-request credential check.
    pub gate: Arc<AuthenticationGate>,
    /// Method/path/role rule table.
    pub policy: AccessPolicy,
    /// Login exchange.
    pub authenticator: Arc<LoginAuthenticator>,
    /// Category use cases.
    pub categories: Arc<CategoryService>,
    /// Product use cases.
    pub products: Arc<ProductService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
