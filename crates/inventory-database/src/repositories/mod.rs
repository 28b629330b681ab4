//! PostgreSQL repository implementations for the catalog.

pub mod category;
pub mod product;

pub use category::PgCategoryRepository;
pub use product::PgProductRepository;

use inventory_core::error::{AppError, ErrorKind};
use inventory_core::types::PageRequest;

/// Wrap a sqlx error as a database error with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Whether the error is a foreign-key violation reported by PostgreSQL.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// `LIMIT` and `OFFSET` bind values for a page request.
pub(crate) fn limit_offset(page: &PageRequest) -> (i64, i64) {
    (
        i64::try_from(page.limit()).unwrap_or(i64::MAX),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}
