//! # Spreadsheet Codec
//!
//! Bulk import and export of records as xlsx workbooks.
//!
//! - [`columns`] - the ordered column table shared by both directions
//! - [`import`] - first sheet of a workbook into [`RecordDraft`](crate::model::RecordDraft)s
//! - [`export`] - records into a one-sheet workbook named `Estoque`

pub mod columns;
pub mod export;
pub mod import;

pub use columns::{rows_to_drafts, ColumnSpec, COLUMNS};
pub use export::{export_file_name, sheet_title, write_workbook, SHEET_NAME};
pub use import::read_drafts;

use thiserror::Error;

/// Errors raised while reading or writing a workbook.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Failed to read workbook: {0}")]
    Read(#[from] calamine::XlsxError),
    #[error("Workbook has no sheets")]
    NoSheet,
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
