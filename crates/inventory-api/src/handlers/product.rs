//! Product handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use inventory_entity::product::Product;

use crate::dto::request::ProductRequest;
use crate::dto::response::PageBody;
use crate::error::{ApiError, ApiErrorResponse};
use crate::extractors::{AuthUser, PaginationParams, ResourceId, ValidatedJson};
use crate::state::AppState;

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of products", body = PageBody<Product>),
        (status = 400, description = "Unknown sort field or direction", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    State(state): State<AppState>,
    params: PaginationParams,
) -> Result<Json<PageBody<Product>>, ApiError> {
    let page = state
        .products
        .list(&params.page_request(), &params.sort_field()?)
        .await?;
    Ok(Json(page.into()))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No such product", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.get(id).await?))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created at version 0", body = Product),
        (status = 400, description = "Invalid body", body = ApiErrorResponse),
        (status = 403, description = "Caller lacks the FULL role", body = ApiErrorResponse),
        (status = 404, description = "Category does not exist", body = ApiErrorResponse),
        (status = 409, description = "A version was supplied", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(&auth, req.into_mutation()?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product replaced; version advanced by one", body = Product),
        (status = 404, description = "No such product or category", body = ApiErrorResponse),
        (status = 409, description = "Supplied version is stale", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update(&auth, id, req.into_mutation()?).await?;
    Ok(Json(product))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No such product", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, ApiError> {
    state.products.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
