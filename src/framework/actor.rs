//! # In-Process Table
//!
//! `TableActor` is a table that lives inside a Tokio task. It owns its rows
//! and processes one [`TableRequest`] at a time, so the rows need no lock.
//! It behaves like the hosted table the application normally talks to:
//! sequential ids, `created_at` stamps, newest-first selects, patch by id and
//! delete by id or id set.

use crate::framework::client::TableClient;
use crate::framework::error::StoreError;
use crate::framework::message::TableRequest;
use crate::framework::row::TableRow;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of an in-process table.
///
/// # Usage Pattern
///
/// 1.  **Create**: `TableActor::new()` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run()` in a background task.
/// 3.  **Use**: share clones of the client; dropping every clone stops the actor.
///
/// # Implementation Details
///
/// Rows are kept in a `Vec`, newest first. A batch insert is validated as a
/// whole: if any row fails its `on_insert` hook, nothing is stored.
pub struct TableActor<T: TableRow> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: Vec<T>,
    next_id: u32,
}

impl<T: TableRow> TableActor<T> {
    /// Creates a new `TableActor` and its associated `TableClient`.
    ///
    /// * `buffer_size` - capacity of the request channel. When full, client
    ///   calls wait for room.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: Vec::new(),
            next_id: 1,
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the request loop until every client is dropped.
    pub async fn run(mut self) {
        let table = T::TABLE;
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Select { limit, respond_to } => {
                    let take = limit.unwrap_or(self.rows.len());
                    let rows: Vec<T> = self.rows.iter().take(take).cloned().collect();
                    debug!(table, ?limit, returned = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Insert { rows, respond_to } => {
                    debug!(table, ?rows, "Insert");
                    let result = self.insert_batch(rows);
                    match &result {
                        Ok(inserted) => {
                            info!(table, inserted = inserted.len(), size = self.rows.len(), "Inserted")
                        }
                        Err(e) => warn!(table, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(table, %id, ?patch, "Update");
                    if let Some(row) = self.rows.iter_mut().find(|row| row.id() == &id) {
                        if let Err(e) = row.apply_patch(patch) {
                            warn!(table, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                            continue;
                        }
                        info!(table, %id, "Updated");
                        let _ = respond_to.send(Ok(row.clone()));
                    } else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    match self.rows.iter().position(|row| row.id() == &id) {
                        Some(index) => {
                            if let Err(e) = self.rows[index].on_delete() {
                                warn!(table, %id, error = %e, "on_delete failed");
                                let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                                continue;
                            }
                            self.rows.remove(index);
                            info!(table, %id, size = self.rows.len(), "Deleted");
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(table, %id, "Not found");
                            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        }
                    }
                }
                TableRequest::DeleteMany { ids, respond_to } => {
                    debug!(table, ?ids, "DeleteMany");
                    let before = self.rows.len();
                    self.rows.retain(|row| !ids.contains(row.id()));
                    info!(
                        table,
                        removed = before - self.rows.len(),
                        size = self.rows.len(),
                        "Deleted many"
                    );
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }

    fn insert_batch(&mut self, inserts: Vec<T::Insert>) -> Result<Vec<T>, StoreError> {
        let created_at = Utc::now();
        let mut next_id = self.next_id;
        let mut built = Vec::with_capacity(inserts.len());
        for insert in inserts {
            let id = T::Id::from(next_id);
            next_id += 1;
            let row = T::from_insert(id, created_at, insert)
                .map_err(|e| StoreError::Rejected(Box::new(e)))?;
            row.on_insert()
                .map_err(|e| StoreError::Rejected(Box::new(e)))?;
            built.push(row);
        }
        self.next_id = next_id;
        // The whole batch shares one timestamp; keep it in input order on top.
        self.rows.splice(0..0, built.iter().cloned());
        Ok(built)
    }
}
