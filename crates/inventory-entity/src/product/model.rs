//! Product entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use inventory_core::traits::Versioned;

/// Fields a product listing may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name", "price", "quantity"];

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Unit price. Always positive.
    pub price: f64,
    /// Units in stock. Never negative.
    pub quantity: i32,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Owning category.
    pub category_id: i64,
}

impl Versioned for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

/// Caller-supplied product fields for create and replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub quantity: i32,
    /// Owning category.
    pub category_id: i64,
}
