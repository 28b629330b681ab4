//! Category repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_core::traits::VersionedRepository;
use inventory_core::types::{PageRequest, PageResponse, SortField};
use inventory_entity::category::{Category, CategoryDraft, SORTABLE_FIELDS};

use super::{db_error, is_foreign_key_violation, limit_offset};

/// Repository for category CRUD backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionedRepository<Category, CategoryDraft> for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, version FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find category by id"))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> AppResult<PageResponse<Category>> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count categories"))?;

        // `sort.field` is whitelisted above, so interpolation is safe.
        let sql = format!(
            "SELECT id, name, version FROM categories ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            sort.field,
            sort.direction.as_sql()
        );
        let (limit, offset) = limit_offset(page);
        let categories = sqlx::query_as::<_, Category>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list categories"))?;

        Ok(PageResponse::new(categories, page, total.max(0) as u64))
    }

    async fn create(&self, draft: &CategoryDraft) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, version) VALUES ($1, 0) RETURNING id, name, version",
        )
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create category"))
    }

    async fn update_if_version(
        &self,
        id: i64,
        expected_version: i64,
        draft: &CategoryDraft,
    ) -> AppResult<Category> {
        let updated = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $3, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING id, name, version",
        )
        .bind(id)
        .bind(expected_version)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update category"))?;

        match updated {
            Some(category) => Ok(category),
            None if self.exists(id).await? => Err(AppError::conflict(
                "Versions do not match. The category was already modified.",
            )),
            None => Err(AppError::not_found(format!(
                "Category not found with id: {id}"
            ))),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::with_source(
                        ErrorKind::Conflict,
                        "Category still has products assigned",
                        e,
                    )
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to delete category", e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }
}
