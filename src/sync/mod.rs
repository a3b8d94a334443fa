//! # Inventory Synchronizer
//!
//! [`InventoryStore`] owns the in-memory collection of records and is the
//! only thing that changes it. Writes are sent to a [`RemoteTable`](crate::framework::RemoteTable);
//! when the table cannot be used, the write is applied locally so the user
//! still sees it.
//!
//! ## Structure
//!
//! - [`store`] - [`InventoryStore`], [`SyncOutcome`], [`ConnectionState`]
//! - [`local_id`] - temporary ids for records that exist only locally
//! - [`error`] - [`InventoryError`] for writes refused before they are sent

pub mod error;
pub mod local_id;
pub mod store;

pub use error::*;
pub use store::*;
