//! Repository traits for versioned catalog entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::result::AppResult;
use crate::types::pagination::{PageRequest, PageResponse};
use crate::types::sorting::SortField;

/// An entity carrying an optimistic-concurrency version.
pub trait Versioned {
    /// Primary key.
    fn id(&self) -> i64;

    /// Version stored alongside the entity. Starts at 0, +1 per successful update.
    fn version(&self) -> i64;
}

/// CRUD repository for entities guarded by a stored version.
///
/// `Draft` is the caller-supplied field set used for both creation and
/// replacement; the repository owns `id` and `version`.
#[async_trait]
pub trait VersionedRepository<Entity, Draft>: Send + Sync + 'static
where
    Entity: Versioned + Serialize + Send + Sync + 'static,
    Draft: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Entity>>;

    /// Find all entities with pagination and sorting.
    ///
    /// `sort.field` must already be validated against the entity's sortable fields.
    async fn find_all(&self, page: &PageRequest, sort: &SortField)
    -> AppResult<PageResponse<Entity>>;

    /// Insert a new entity at version 0.
    async fn create(&self, draft: &Draft) -> AppResult<Entity>;

    /// Atomically replace the entity's fields iff its stored version equals
    /// `expected_version`, incrementing the version by one.
    ///
    /// Fails with `NotFound` if the id is unknown and `Conflict` if the
    /// stored version moved.
    async fn update_if_version(
        &self,
        id: i64,
        expected_version: i64,
        draft: &Draft,
    ) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Whether an entity with this id exists.
    async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
