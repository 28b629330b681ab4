//! A concurrent in-memory table keyed by generated ids.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use dashmap::DashMap;
use serde::Serialize;

use inventory_core::error::AppError;
use inventory_core::result::AppResult;
use inventory_core::traits::Versioned;
use inventory_core::types::{PageRequest, PageResponse};

/// Rows keyed by id, with ids handed out from 1 upward.
///
/// Conditional replacement runs while holding the row's shard write lock,
/// so the version compare and the write are a single atomic step.
#[derive(Debug)]
pub struct MemoryTable<E> {
    label: &'static str,
    rows: DashMap<i64, E>,
    next_id: AtomicI64,
}

impl<E> MemoryTable<E>
where
    E: Versioned + Clone + Serialize,
{
    /// Creates an empty table. `label` names the entity in error messages.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns a copy of the row with this id.
    pub fn get(&self, id: i64) -> Option<E> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    /// Inserts the row produced by `build` for a freshly allocated id.
    pub fn insert_with(&self, build: impl FnOnce(i64) -> E) -> E {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Replaces the row iff its version equals `expected_version`.
    ///
    /// `build` receives the current row and must return its successor with
    /// the version already advanced.
    pub fn replace_if_version(
        &self,
        id: i64,
        expected_version: i64,
        build: impl FnOnce(&E) -> E,
    ) -> AppResult<E> {
        let mut row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("{} not found with id: {id}", self.label)))?;

        if row.version() != expected_version {
            return Err(AppError::conflict(format!(
                "Versions do not match. The {} was already modified.",
                self.label.to_lowercase()
            )));
        }

        let next = build(row.value());
        *row.value_mut() = next.clone();
        Ok(next)
    }

    /// Removes the row. Returns `true` if it existed.
    pub fn remove(&self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    /// Counts rows matching `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&E) -> bool) -> u64 {
        self.rows.iter().filter(|row| predicate(row.value())).count() as u64
    }

    /// Returns one page of rows ordered by `compare`.
    pub fn page(
        &self,
        request: &PageRequest,
        compare: impl Fn(&E, &E) -> Ordering,
    ) -> PageResponse<E> {
        let mut all: Vec<E> = self.rows.iter().map(|row| row.value().clone()).collect();
        all.sort_by(|a, b| compare(a, b).then_with(|| a.id().cmp(&b.id())));

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();

        PageResponse::new(items, request, total)
    }
}
