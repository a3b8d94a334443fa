//! # Query Pipeline
//!
//! Turns the synchronizer's collection into the rows a table view shows:
//!
//! 1. **Search**: case-insensitive substring over every field.
//! 2. **Column filters**: per-field allow-lists; a missing entry means "all".
//! 3. **Sort**: numeric when every value of the column is a number, text otherwise; stable.
//!
//! ```rust
//! use mezzanine_stock::model::{Category, InventoryRecord, RecordDraft, RecordId};
//! use mezzanine_stock::query::{Field, SortDirection, ViewQuery};
//!
//! let items: Vec<InventoryRecord> = [10, 5, 20]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, qtd)| {
//!         let draft = RecordDraft::new(Category::Ink, "Tinta").with_quantity(qtd);
//!         InventoryRecord::from_insert(RecordId::from(i as u32), &draft.into_insert())
//!     })
//!     .collect();
//!
//! let view = ViewQuery::new()
//!     .with_sort(Field::Quantity, SortDirection::Ascending)
//!     .apply(&items);
//! let quantities: Vec<u64> = view.iter().map(|item| item.quantity).collect();
//! assert_eq!(quantities, vec![5, 10, 20]);
//! ```

pub mod field;
pub mod filters;
pub mod pipeline;

pub use field::*;
pub use filters::*;
pub use pipeline::*;
