//! # Mock Tables
//!
//! Utilities for testing code that sits on top of a [`RemoteTable`] without a
//! real table behind it.
//!
//! ## When to use Mocks vs the In-Process Table
//!
//! | Feature | MockTable | TableActor |
//! |---------|-----------|------------|
//! | **State** | None (scripted responses) | Real rows |
//! | **Error Injection** | Easy (`return_err`) | Only "unreachable" (drop the actor) |
//! | **Use Case** | Fallback paths of the synchronizer | End-to-end flows |
//!
//! ## Fluent API
//!
//! ```rust
//! use mezzanine_stock::framework::mock::MockTable;
//! use mezzanine_stock::framework::{RemoteTable, StoreError};
//! use mezzanine_stock::model::InventoryRow;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<InventoryRow>::new();
//!     mock.expect_select().return_err(StoreError::ActorClosed);
//!
//!     let table = mock.client();
//!     assert!(table.select(None).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! ## Low-Level Helpers
//!
//! [`create_mock_table`] hands back the raw request receiver. Helpers such as
//! [`expect_insert`] pull the next request off it so a test can inspect the
//! payload and answer it by hand.

use crate::framework::client::TableClient;
use crate::framework::error::StoreError;
use crate::framework::message::{Response, TableRequest};
use crate::framework::row::TableRow;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: TableRow> {
    Select {
        response: Result<Vec<T>, StoreError>,
    },
    Insert {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    DeleteMany {
        response: Result<(), StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted table. Requests are answered in the order expectations were
/// registered.
///
/// A request that does not match the next expectation (wrong kind or wrong
/// id) panics the background task; the caller then sees
/// [`StoreError::ActorDropped`] and [`MockTable::verify`] reports the leftover
/// expectation.
pub struct MockTable<T: TableRow> {
    client: TableClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRow> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> MockTable<T> {
    /// Creates a new mock table with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .map(|mut exps| exps.pop_front())
                    .unwrap_or(None);

                match (request, expectation) {
                    (
                        TableRequest::Select { respond_to, .. },
                        Some(Expectation::Select { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Insert { respond_to, .. },
                        Some(Expectation::Insert { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "update sent for an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "delete sent for an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        TableRequest::DeleteMany { respond_to, .. },
                        Some(Expectation::DeleteMany { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    /// Expects a `select`.
    pub fn expect_select(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Select { response })
    }

    /// Expects an `insert`.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::Insert { response })
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects a `delete_many`.
    pub fn expect_delete_many(&mut self) -> ExpectationBuilder<T, ()> {
        self.builder(|response| Expectation::DeleteMany { response })
    }

    /// Panics if some expectations were never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().map(|exps| exps.len()).unwrap_or(0);
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with its response.
pub struct ExpectationBuilder<T: TableRow, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: TableRow, R> ExpectationBuilder<T, R> {
    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer with an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        if let Ok(mut exps) = self.expectations.lock() {
            exps.push_back(expectation);
        }
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a table client and the receiver its requests arrive on.
pub fn create_mock_table<T: TableRow>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Pulls the next request, returning it only if it is a `select`.
pub async fn expect_select<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Option<usize>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Select { limit, respond_to }) => Some((limit, respond_to)),
        _ => None,
    }
}

/// Pulls the next request, returning it only if it is an `insert`.
pub async fn expect_insert<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Vec<T::Insert>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Insert { rows, respond_to }) => Some((rows, respond_to)),
        _ => None,
    }
}

/// Pulls the next request, returning it only if it is an `update`.
pub async fn expect_update<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(TableRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Pulls the next request, returning it only if it is a `delete_many`.
pub async fn expect_delete_many<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Vec<T::Id>, Response<()>)> {
    match receiver.recv().await {
        Some(TableRequest::DeleteMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::RemoteTable;
    use crate::model::{Category, InventoryInsert, InventoryRow, RecordDraft, RecordId};

    fn insert(material: &str) -> InventoryInsert {
        RecordDraft::new(Category::Ink, material).into_insert()
    }

    #[tokio::test]
    async fn test_mock_table_raw_requests() {
        let (client, mut receiver) = create_mock_table::<InventoryRow>(10);

        let insert_task = tokio::spawn(async move { client.insert(vec![insert("Tinta")]).await });

        let (rows, responder) = expect_insert(&mut receiver)
            .await
            .expect("Expected Insert request");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].material, "Tinta");
        responder.send(Err(StoreError::ActorClosed)).unwrap();

        let result = insert_task.await.unwrap();
        assert!(matches!(result, Err(StoreError::ActorClosed)));
    }

    #[tokio::test]
    async fn test_mock_table_with_expectations() {
        let mut mock = MockTable::<InventoryRow>::new();

        mock.expect_select().return_ok(Vec::new());
        mock.expect_delete(RecordId::from("7")).return_ok(());

        let table = mock.client();

        assert!(table.select(Some(10)).await.unwrap().is_empty());
        table.delete(RecordId::from("7")).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_table_mismatch_drops_response() {
        let mut mock = MockTable::<InventoryRow>::new();
        mock.expect_select().return_ok(Vec::new());

        let result = mock.client().delete_many(Vec::new()).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));
    }
}
