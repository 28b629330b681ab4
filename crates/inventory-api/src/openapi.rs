//! OpenAPI document for the catalog API.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use inventory_entity::category::Category;
use inventory_entity::product::Product;

use crate::dto::request::{CategoryRequest, LoginRequest, ProductRequest};
use crate::dto::response::{LoginResponse, PageBody};
use crate::error::ApiErrorResponse;

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Catalog API",
        version = "0.1.0",
        description = "Categories and products with token authentication and optimistic concurrency"
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::category::list_categories,
        crate::handlers::category::get_category,
        crate::handlers::category::create_category,
        crate::handlers::category::update_category,
        crate::handlers::category::delete_category,
        crate::handlers::product::list_products,
        crate::handlers::product::get_product,
        crate::handlers::product::create_product,
        crate::handlers::product::update_product,
        crate::handlers::product::delete_product,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            CategoryRequest,
            ProductRequest,
            Category,
            Product,
            PageBody<Category>,
            PageBody<Product>,
            ApiErrorResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Token issuance"),
        (name = "Categories", description = "Category management"),
        (name = "Products", description = "Product management"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer token scheme referenced by protected paths.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
