//! # RemoteTable Trait
//!
//! The seam between the synchronizer and whatever actually stores the rows.
//! Two implementations ship with the crate:
//!
//! - [`TableClient`](crate::framework::TableClient): an in-process table task.
//! - [`RestTable`](crate::framework::RestTable): a hosted table over HTTP.
//!
//! Tests use [`MockTable`](crate::framework::mock::MockTable) to script
//! successes and failures.

use crate::framework::error::StoreError;
use crate::framework::row::TableRow;
use async_trait::async_trait;

/// Operations a hosted table offers.
#[async_trait]
pub trait RemoteTable<T: TableRow>: Send + Sync {
    /// All rows ordered by creation time, newest first, optionally capped.
    async fn select(&self, limit: Option<usize>) -> Result<Vec<T>, StoreError>;

    /// Insert one or many rows, returning the stored rows.
    async fn insert(&self, rows: Vec<T::Insert>) -> Result<Vec<T>, StoreError>;

    /// Patch the row with the given id, returning its new state.
    async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError>;

    /// Delete the row with the given id.
    async fn delete(&self, id: T::Id) -> Result<(), StoreError>;

    /// Delete every row whose id is in `ids`. Unknown ids are ignored.
    async fn delete_many(&self, ids: Vec<T::Id>) -> Result<(), StoreError>;
}
