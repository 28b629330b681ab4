//! `AuthUser` extractor: the identity the admission middleware attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use inventory_auth::Identity;
use inventory_auth::gate::admission::UNAUTHENTICATED_MESSAGE;
use inventory_core::error::AppError;
use inventory_service::RequestContext;

use crate::error::ApiError;

/// Authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .ok_or_else(|| AppError::authentication(UNAUTHENTICATED_MESSAGE))?;
        Ok(AuthUser(RequestContext::new(identity)))
    }
}
