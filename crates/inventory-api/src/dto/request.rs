//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use inventory_core::error::AppError;
use inventory_entity::category::CategoryDraft;
use inventory_entity::product::ProductDraft;
use inventory_service::Mutation;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create or replace a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    /// Display name, 3 to 100 characters.
    #[validate(length(
        min = 3,
        max = 100,
        message = "Category name must be between 3 and 100 characters"
    ))]
    pub name: String,
    /// Version the caller last saw. Omit to skip the concurrency check on update.
    #[serde(default)]
    pub version: Option<i64>,
}

impl CategoryRequest {
    /// Converts into a service mutation.
    pub fn into_mutation(self) -> Result<Mutation<CategoryDraft>, AppError> {
        require_not_blank("name", &self.name)?;
        Ok(Mutation {
            draft: CategoryDraft { name: self.name },
            version: self.version,
        })
    }
}

/// Create or replace a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Display name.
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price, greater than zero.
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,
    /// Units in stock, zero or more.
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    /// Owning category.
    pub category_id: i64,
    /// Version the caller last saw. Omit to skip the concurrency check on update.
    #[serde(default)]
    pub version: Option<i64>,
}

impl ProductRequest {
    /// Converts into a service mutation.
    pub fn into_mutation(self) -> Result<Mutation<ProductDraft>, AppError> {
        require_not_blank("name", &self.name)?;
        Ok(Mutation {
            draft: ProductDraft {
                name: self.name,
                description: self.description,
                price: self.price,
                quantity: self.quantity,
                category_id: self.category_id,
            },
            version: self.version,
        })
    }
}

fn require_not_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field}: must not be blank")));
    }
    Ok(())
}
