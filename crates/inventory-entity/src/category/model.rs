//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use inventory_core::traits::Versioned;

/// Fields a category listing may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name"];

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    /// Unique category identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optimistic-concurrency version.
    pub version: i64,
}

impl Versioned for Category {
    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

/// Caller-supplied category fields for create and replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    /// Display name.
    pub name: String,
}
