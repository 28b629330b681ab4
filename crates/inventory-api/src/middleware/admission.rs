//! Authentication gate and access policy, run before every handler.

use std::collections::BTreeSet;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use inventory_auth::gate::admission::UNAUTHENTICATED_MESSAGE;
use inventory_auth::Admission;
use inventory_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Admits the request or short-circuits with 401 / 403.
///
/// On success the verified [`inventory_auth::Identity`] is stored in the
/// request extensions for the `AuthUser` extractor.
pub async fn admit(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let admission = state.gate.admit(request.headers(), &path);
    let identity = match admission {
        Admission::Rejected(reason) => return ApiError(reason.into()).into_response(),
        Admission::Anonymous => None,
        Admission::Authenticated(identity) => Some(identity),
    };

    let empty = BTreeSet::new();
    let roles = identity.as_ref().map_or(&empty, |i| &i.roles);
    if !state.policy.decide(&method, &path, roles).is_allowed() {
        debug!(
            method = %method,
            path = %path,
            subject = identity.as_ref().map(|i| i.subject.as_str()),
            "Request denied by access policy"
        );
        let err = match identity {
            Some(_) => AppError::authorization("Access denied"),
            None => AppError::authentication(UNAUTHENTICATED_MESSAGE),
        };
        return ApiError(err).into_response();
    }

    if let Some(identity) = identity {
        request.extensions_mut().insert(identity);
    }
    next.run(request).await
}
