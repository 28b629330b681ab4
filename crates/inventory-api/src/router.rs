//! Route definitions for the catalog HTTP API.

use axum::Router;
use axum::routing::{get, post};

use inventory_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the route table. Middleware is layered on in [`crate::app::build_app`].
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(category_routes())
        .merge(product_routes())
        .merge(docs_routes())
        .fallback(fallback)
}

/// Unknown paths answer with the standard error body.
async fn fallback() -> ApiError {
    AppError::not_found("No such resource").into()
}

/// Auth endpoints: login
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login))
}

/// Category CRUD
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
}

/// Product CRUD
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
}

/// OpenAPI document
fn docs_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(handlers::docs::openapi_json))
}
