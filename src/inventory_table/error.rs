//! Error types for the inventory table.

use thiserror::Error;

/// Reasons the in-process inventory table refuses a row.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RowError {
    /// Every row must name its material.
    #[error("Material must not be empty")]
    EmptyMaterial,

    /// A patch tried to blank out the material.
    #[error("Patch would clear the material of row {0}")]
    ClearedMaterial(String),
}
