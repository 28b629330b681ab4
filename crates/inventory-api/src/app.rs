//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use inventory_auth::{
    AccessPolicy, AccountDirectory, AuthenticationGate, LoginAuthenticator, PasswordHasher,
    RoleLookup, TokenCodec,
};
use inventory_core::config::AppConfig;
use inventory_core::error::AppError;
use inventory_core::result::AppResult;
use inventory_core::traits::Clock;
use inventory_database::CatalogStores;
use inventory_service::{CategoryService, ProductService};

use crate::middleware::admission::admit;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from configuration and the selected stores.
///
/// Fails when the signing secret is too short, the token lifetime is zero,
/// or an account entry is malformed.
pub fn build_state(
    config: AppConfig,
    stores: CatalogStores,
    clock: Arc<dyn Clock>,
    hasher: PasswordHasher,
) -> AppResult<AppState> {
    if config.auth.uses_development_secret() {
        warn!("auth.jwt_secret is the development default; set INVENTORY__AUTH__JWT_SECRET");
    }
    let codec = Arc::new(TokenCodec::from_config(&config.auth, clock)?);
    let directory = Arc::new(AccountDirectory::from_config(&config.auth.accounts)?);
    if directory.is_empty() {
        warn!("No accounts configured; every login will be rejected");
    }

    let policy = AccessPolicy::new();
    let roles: Arc<dyn RoleLookup> = directory.clone();
    let gate = Arc::new(AuthenticationGate::new(codec.clone(), roles, policy));
    let authenticator = Arc::new(LoginAuthenticator::new(directory, hasher, codec)?);

    let categories = Arc::new(CategoryService::new(
        stores.categories.clone(),
        stores.products.clone(),
    ));
    let products = Arc::new(ProductService::new(stores.products, stores.categories));

    Ok(AppState {
        config: Arc::new(config),
        gate,
        policy,
        authenticator,
        categories,
        products,
    })
}

/// Builds the complete Axum application with all routes and middleware.
///
/// Admission runs innermost so CORS preflight requests are answered
/// before any credential is demanded.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router()
        .layer(axum_middleware::from_fn_with_state(state.clone(), admit))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Runs the catalog server until Ctrl+C or SIGTERM.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {addr}: {e}")))?;
    info!("Inventory catalog listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
