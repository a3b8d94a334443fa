//! Error types for the synchronizer.
//!
//! Remote failures never show up here: they are absorbed by the local
//! fallback and reported through [`SyncOutcome`](crate::sync::SyncOutcome).

use crate::spreadsheet::SpreadsheetError;
use thiserror::Error;

/// Errors that can occur before a write reaches the table.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A record was submitted without a material.
    #[error("Material is required")]
    MissingMaterial,

    /// A row of an import batch has no material. `row` is zero-based.
    #[error("Import row {row} has no material")]
    MissingMaterialAt { row: usize },

    /// The workbook could not be read or written.
    #[error(transparent)]
    Spreadsheet(#[from] SpreadsheetError),
}
