//! # Inventory Table
//!
//! An in-process copy of the hosted `inventory` table, built on the generic
//! [`TableActor`].
//!
//! ## Structure
//!
//! - [`entity`] - [`TableRow`](crate::framework::TableRow) implementation for [`InventoryRow`]
//! - [`error`] - [`RowError`] for rows the table refuses
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use mezzanine_stock::framework::RemoteTable;
//! use mezzanine_stock::inventory_table;
//! use mezzanine_stock::model::{Category, RecordDraft};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = inventory_table::new();
//!     tokio::spawn(actor.run());
//!
//!     let draft = RecordDraft::new(Category::Ink, "Tinta Azul Royal").with_quantity(50);
//!     let rows = client.insert(vec![draft.into_insert()]).await?;
//!     assert_eq!(rows[0].id.as_str(), "1");
//!     Ok(())
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Sequential ID generation**: ids are `1`, `2`, … like the hosted table's
//!   identity column
//! - **Validation**: rows without a material are refused as a whole batch

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{TableActor, TableClient};
use crate::model::InventoryRow;

/// Creates a new inventory table actor and its client.
pub fn new() -> (TableActor<InventoryRow>, TableClient<InventoryRow>) {
    TableActor::new(32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{RemoteTable, StoreError};
    use crate::model::{Category, RecordDraft, RecordId, RecordPatch};

    #[tokio::test]
    async fn test_inventory_table_roundtrip() {
        let (actor, client) = new();
        tokio::spawn(actor.run());

        let rows = client
            .insert(vec![
                RecordDraft::new(Category::Fiber, "Kevlar 49").into_insert(),
                RecordDraft::new(Category::Packaging, "Caixa Papelão G")
                    .with_quantity(5000)
                    .into_insert(),
            ])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.created_at.is_some()));

        let updated = client
            .update(
                RecordId::from(1),
                RecordPatch {
                    status: Some("PAGO".into()),
                    ..RecordPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("PAGO"));
        assert_eq!(updated.material, "Kevlar 49");
    }

    #[tokio::test]
    async fn test_inventory_table_refuses_blank_material() {
        let (actor, client) = new();
        tokio::spawn(actor.run());

        let result = client
            .insert(vec![RecordDraft::new(Category::Ink, "  ").into_insert()])
            .await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));

        client
            .insert(vec![RecordDraft::new(Category::Ink, "Tinta").into_insert()])
            .await
            .unwrap();
        let result = client
            .update(
                RecordId::from(1),
                RecordPatch {
                    material: Some(String::new()),
                    ..RecordPatch::default()
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }
}
