//! Pure data structures: the in-memory record, its partial payloads and the
//! rows exchanged with the `inventory` table.

pub mod category;
pub mod record;
pub mod row;

pub use category::*;
pub use record::*;
pub use row::*;
