//! # Table Messages
//!
//! Messages exchanged between a [`TableClient`](crate::framework::TableClient)
//! and its [`TableActor`](crate::framework::TableActor).

use crate::framework::error::StoreError;
use crate::framework::row::TableRow;
use tokio::sync::oneshot;

/// One-shot response channel used by the table actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request sent to the table actor.
///
/// The variants mirror the operations a hosted table offers: a full select
/// ordered newest first, batch insert, patch by id, delete by id and delete by
/// id set.
#[derive(Debug)]
pub enum TableRequest<T: TableRow> {
    Select {
        limit: Option<usize>,
        respond_to: Response<Vec<T>>,
    },
    Insert {
        rows: Vec<T::Insert>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    DeleteMany {
        ids: Vec<T::Id>,
        respond_to: Response<()>,
    },
}
