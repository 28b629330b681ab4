//! # inventory-api
//!
//! HTTP API layer for the inventory catalog built on Axum.
//!
//! Provides the REST endpoints, the admission middleware that runs the
//! authentication gate and access policy, request logging, CORS, error
//! mapping, and the OpenAPI document.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
