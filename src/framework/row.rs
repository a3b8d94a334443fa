//! # TableRow Trait
//!
//! The `TableRow` trait is the contract a row type must satisfy to live in a
//! table served by [`TableActor`](crate::framework::TableActor) or fetched
//! through any [`RemoteTable`](crate::framework::RemoteTable).
//!
//! # Associated Types
//! Inserts and patches get their own payload types (`Insert`, `Patch`), so a
//! row can never be inserted with a half-built payload and a patch can never
//! carry fields the table does not know about.
//!
//! # Provided Methods (Hooks)
//! - [`TableRow::on_insert`] validates a freshly built row before it is stored.
//! - [`TableRow::on_delete`] runs right before a row leaves the table.
//!
//! Both default to `Ok(())`.

use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row of a remote table.
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Primary key. Must be convertible from `u32` so the in-process table can
    /// hand out sequential ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload of an insert (no id, no timestamps).
    type Insert: Send + Sync + Debug;

    /// Partial update; unset fields stay untouched.
    type Patch: Send + Sync + Debug;

    /// Row-level validation error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of the table on the remote side.
    const TABLE: &'static str;

    /// The row's primary key.
    fn id(&self) -> &Self::Id;

    /// Build the stored row from the id and timestamp assigned by the table.
    fn from_insert(
        id: Self::Id,
        created_at: DateTime<Utc>,
        insert: Self::Insert,
    ) -> Result<Self, Self::Error>;

    /// Merge a patch into the row.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    // --- Lifecycle Hooks ---

    /// Called after `from_insert`, before the row is stored.
    fn on_insert(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the row is removed.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
