//! # Table Client
//!
//! The handle used to talk to a [`TableActor`](crate::framework::TableActor).

use crate::framework::error::StoreError;
use crate::framework::message::{Response, TableRequest};
use crate::framework::remote::RemoteTable;
use crate::framework::row::TableRow;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe handle to an in-process table.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Async API** – every operation resolves to `Result<…, StoreError>`.
/// * **Seam** – implements [`RemoteTable`], so the synchronizer cannot tell it
///   apart from the HTTP table.
pub struct TableClient<T: TableRow> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableRow> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableRow> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> TableRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl<T: TableRow> RemoteTable<T> for TableClient<T> {
    async fn select(&self, limit: Option<usize>) -> Result<Vec<T>, StoreError> {
        self.call(|respond_to| TableRequest::Select { limit, respond_to })
            .await
    }

    async fn insert(&self, rows: Vec<T::Insert>) -> Result<Vec<T>, StoreError> {
        self.call(|respond_to| TableRequest::Insert { rows, respond_to })
            .await
    }

    async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        self.call(|respond_to| TableRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.call(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    async fn delete_many(&self, ids: Vec<T::Id>) -> Result<(), StoreError> {
        self.call(|respond_to| TableRequest::DeleteMany { ids, respond_to })
            .await
    }
}
