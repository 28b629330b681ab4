//! Product repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_core::traits::VersionedRepository;
use inventory_core::types::{PageRequest, PageResponse, SortField};
use inventory_entity::product::{Product, ProductDraft, SORTABLE_FIELDS};

use super::{db_error, is_foreign_key_violation, limit_offset};
use crate::store::ProductRepository;

const COLUMNS: &str = "id, name, description, price, quantity, version, category_id";

/// Repository for product CRUD backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a write failure, turning a dangling category reference into `NotFound`.
fn write_error(draft: &ProductDraft, context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    let category_id = draft.category_id;
    move |e| {
        if is_foreign_key_violation(&e) {
            AppError::with_source(
                ErrorKind::NotFound,
                format!("Category not found with id: {category_id}"),
                e,
            )
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}

#[async_trait]
impl VersionedRepository<Product, ProductDraft> for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find product by id"))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> AppResult<PageResponse<Product>> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count products"))?;

        let sql = format!(
            "SELECT {COLUMNS} FROM products ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            sort.field,
            sort.direction.as_sql()
        );
        let (limit, offset) = limit_offset(page);
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list products"))?;

        Ok(PageResponse::new(products, page, total.max(0) as u64))
    }

    async fn create(&self, draft: &ProductDraft) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, quantity, version, category_id) \
             VALUES ($1, $2, $3, $4, 0, $5) RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(draft, "Failed to create product"))
    }

    async fn update_if_version(
        &self,
        id: i64,
        expected_version: i64,
        draft: &ProductDraft,
    ) -> AppResult<Product> {
        let updated = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $3, description = $4, price = $5, quantity = $6, \
             category_id = $7, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(expected_version)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(draft, "Failed to update product"))?;

        match updated {
            Some(product) => Ok(product),
            None if self.exists(id).await? => Err(AppError::conflict(
                "Versions do not match. The product was already modified.",
            )),
            None => Err(AppError::not_found(format!("Product not found with id: {id}"))),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete product"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn count_by_category(&self, category_id: i64) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count products by category"))?;
        Ok(count.max(0) as u64)
    }
}
