//! Numeric resource id from the `{id}` path segment.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use inventory_core::error::AppError;

use crate::error::ApiError;

/// The `{id}` of a category or product route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Resource id must be an integer"))?;
        Ok(Self(id))
    }
}
