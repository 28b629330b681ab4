//! Category handlers: list, get, create, replace, delete.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use inventory_entity::category::Category;

use crate::dto::request::CategoryRequest;
use crate::dto::response::PageBody;
use crate::error::{ApiError, ApiErrorResponse};
use crate::extractors::{AuthUser, PaginationParams, ResourceId, ValidatedJson};
use crate::state::AppState;

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of categories", body = PageBody<Category>),
        (status = 400, description = "Unknown sort field or direction", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    params: PaginationParams,
) -> Result<Json<PageBody<Category>>, ApiError> {
    let page = state
        .categories
        .list(&params.page_request(), &params.sort_field()?)
        .await?;
    Ok(Json(page.into()))
}

/// GET /categories/{id}
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "No such category", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_category(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.categories.get(id).await?))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created at version 0", body = Category),
        (status = 400, description = "Invalid body", body = ApiErrorResponse),
        (status = 403, description = "Caller lacks the FULL role", body = ApiErrorResponse),
        (status = 409, description = "A version was supplied", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.categories.create(&auth, req.into_mutation()?).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category replaced; version advanced by one", body = Category),
        (status = 404, description = "No such category", body = ApiErrorResponse),
        (status = 409, description = "Supplied version is stale", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .categories
        .update(&auth, id, req.into_mutation()?)
        .await?;
    Ok(Json(category))
}

/// DELETE /categories/{id}
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No such category", body = ApiErrorResponse),
        (status = 409, description = "Products still reference the category", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    state.categories.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
