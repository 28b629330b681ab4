//! Category use cases.

use std::sync::Arc;

use tracing::info;

use inventory_core::error::AppError;
use inventory_core::types::{PageRequest, PageResponse, SortField};
use inventory_database::{CategoryRepository, ProductRepository};
use inventory_entity::category::{Category, CategoryDraft, SORTABLE_FIELDS};

use crate::context::RequestContext;
use crate::guard::{ConcurrencyGuard, Mutation, Target};

/// Lists, reads, and mutates categories.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").finish_non_exhaustive()
    }
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Lists categories.
    pub async fn list(
        &self,
        page: &PageRequest,
        sort: &SortField,
    ) -> Result<PageResponse<Category>, AppError> {
        sort.ensure_one_of(SORTABLE_FIELDS)?;
        self.categories.find_all(page, sort).await
    }

    /// Gets a category by id.
    pub async fn get(&self, id: i64) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a category. A supplied version is a conflict.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: Mutation<CategoryDraft>,
    ) -> Result<Category, AppError> {
        ConcurrencyGuard::ensure(req.version, Target::Create, "category")?;

        let category = self.categories.create(&req.draft).await?;
        info!(actor = %ctx.subject, category_id = category.id, "Category created");
        Ok(category)
    }

    /// Replaces a category's fields.
    ///
    /// With a version, it must equal the stored one. Without, the write is
    /// unchecked against the caller's view but still atomic against the
    /// version read here.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        req: Mutation<CategoryDraft>,
    ) -> Result<Category, AppError> {
        let current = self.get(id).await?;
        ConcurrencyGuard::ensure(
            req.version,
            Target::Update {
                stored_version: current.version,
            },
            "category",
        )?;

        let category = self
            .categories
            .update_if_version(id, current.version, &req.draft)
            .await?;
        info!(
            actor = %ctx.subject,
            category_id = id,
            version = category.version,
            "Category updated"
        );
        Ok(category)
    }

    /// Deletes a category that no product references.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> Result<(), AppError> {
        if !self.categories.exists(id).await? {
            return Err(not_found(id));
        }

        let referencing = self.products.count_by_category(id).await?;
        if referencing > 0 {
            return Err(AppError::conflict(format!(
                "Category {id} still has {referencing} product(s) assigned"
            )));
        }

        if !self.categories.delete(id).await? {
            return Err(not_found(id));
        }
        info!(actor = %ctx.subject, category_id = id, "Category deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("Category not found with id: {id}"))
}
