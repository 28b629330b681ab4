//! Pagination and sorting query parameters.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use inventory_core::error::AppError;
use inventory_core::types::pagination::DEFAULT_PAGE_SIZE;
use inventory_core::types::{PageRequest, SortDirection, SortField};

use crate::error::ApiError;

/// Query parameters for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (0-based, default: 0).
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10, max: 100).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Field to sort by (default: `id`).
    pub sort_by: Option<String>,
    /// `ASC` or `DESC` (default: `ASC`).
    pub sort_dir: Option<String>,
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Converts to a `SortField`. The field name is checked later against
    /// the resource's sortable fields.
    pub fn sort_field(&self) -> Result<SortField, AppError> {
        let direction = match self.sort_dir.as_deref() {
            Some(dir) => dir.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };
        let field = self.sort_by.as_deref().unwrap_or("id");
        Ok(SortField::new(field, direction))
    }
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<Self>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_core::types::pagination::MAX_PAGE_SIZE;

    fn parse(query: &str) -> PaginationParams {
        let uri: axum::http::Uri = format!("/products?{query}").parse().unwrap();
        Query::<PaginationParams>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_defaults() {
        let params = parse("");
        assert_eq!(params.page_request(), PageRequest::new(0, 10));
        let sort = params.sort_field().unwrap();
        assert_eq!(sort.field, "id");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_camel_case_names_and_clamping() {
        let params = parse("page=2&pageSize=500&sortBy=price&sortDir=desc");
        assert_eq!(params.page_request(), PageRequest::new(2, MAX_PAGE_SIZE));
        let sort = params.sort_field().unwrap();
        assert_eq!(sort.field, "price");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_bad_direction_is_validation_error() {
        assert!(parse("sortDir=sideways").sort_field().is_err());
    }
}
