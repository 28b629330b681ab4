//! Auth handler: exchange a username and password for a bearer token.

use axum::Json;
use axum::extract::State;

use crate::dto::request::LoginRequest;
use crate::dto::response::LoginResponse;
use crate::error::{ApiError, ApiErrorResponse};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential accepted", body = LoginResponse),
        (status = 400, description = "Missing username or password", body = ApiErrorResponse),
        (status = 401, description = "Invalid username or password", body = ApiErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let issued = state.authenticator.login(&req.username, &req.password)?;
    Ok(Json(issued.into()))
}
