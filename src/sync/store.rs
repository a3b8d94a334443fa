use crate::dashboard::DashboardStats;
use crate::framework::{RemoteTable, StoreError};
use crate::model::{
    Category, InventoryInsert, InventoryRecord, InventoryRow, RecordDraft, RecordId, RecordPatch,
};
use crate::query::ViewQuery;
use crate::spreadsheet;
use crate::sync::error::InventoryError;
use crate::sync::local_id;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Reachability of the table as last observed by a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No reload has run yet.
    Idle,
    Online,
    /// The last reload failed; the collection shows what was known before.
    Offline,
}

/// How a write was reflected in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The table accepted the write.
    Confirmed,
    /// The table could not be used; the write was applied locally only.
    LocalFallback,
}

/// The in-memory inventory and the only way to change it.
///
/// # Write policy
///
/// Every write goes to the table first. On success the collection is
/// reloaded so it shows the table's state. On failure the write is applied
/// locally instead, so it never disappears from view:
///
/// | Operation | Table failed |
/// |-----------|--------------|
/// | `add` / `import` | records prepended with `local-…` ids |
/// | `update` | fields merged into the matching record |
/// | `delete` / `bulk_delete` | removed anyway |
///
/// Deletes never reload; they remove locally whatever the table said.
pub struct InventoryStore {
    remote: Arc<dyn RemoteTable<InventoryRow>>,
    items: Vec<InventoryRecord>,
    state: ConnectionState,
    last_error: Option<String>,
    row_limit: Option<usize>,
}

impl InventoryStore {
    pub fn new(remote: Arc<dyn RemoteTable<InventoryRow>>) -> Self {
        Self {
            remote,
            items: Vec::new(),
            state: ConnectionState::Idle,
            last_error: None,
            row_limit: None,
        }
    }

    /// Caps how many rows a reload fetches.
    pub fn with_row_limit(mut self, limit: Option<usize>) -> Self {
        self.row_limit = limit;
        self
    }

    // ---- reads ----

    /// The whole collection, newest first.
    pub fn items(&self) -> &[InventoryRecord] {
        &self.items
    }

    pub fn get(&self, id: &RecordId) -> Option<&InventoryRecord> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Records of one category, in collection order.
    pub fn records_in(&self, category: Category) -> Vec<&InventoryRecord> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Message of the failure that put the store offline.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Runs `query` over the collection.
    pub fn view(&self, query: &ViewQuery) -> Vec<&InventoryRecord> {
        query.apply(&self.items)
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(&self.items)
    }

    // ---- writes ----

    /// Replaces the collection with the table's rows.
    ///
    /// On failure the collection is left as it was and the store goes
    /// [`ConnectionState::Offline`].
    #[instrument(skip(self))]
    pub async fn reload(&mut self) -> SyncOutcome {
        match self.refresh().await {
            Ok(()) => SyncOutcome::Confirmed,
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping current items");
                SyncOutcome::LocalFallback
            }
        }
    }

    /// Adds one record.
    ///
    /// # Errors
    /// - `MissingMaterial`: the draft has no material. Nothing is sent.
    #[instrument(skip_all, fields(category = %draft.category))]
    pub async fn add(&mut self, draft: RecordDraft) -> Result<SyncOutcome, InventoryError> {
        if !draft.has_material() {
            return Err(InventoryError::MissingMaterial);
        }
        let insert = draft.into_insert();
        debug!(?insert, "add called");

        match self.remote.insert(vec![insert.clone()]).await {
            Ok(rows) => {
                self.after_insert(rows).await;
                Ok(SyncOutcome::Confirmed)
            }
            Err(e) => {
                warn!(error = %e, "Insert failed, keeping record locally");
                self.prepend_local(vec![insert]);
                Ok(SyncOutcome::LocalFallback)
            }
        }
    }

    /// Applies a partial update to record `id`.
    ///
    /// When the table cannot take it, the set fields are merged into the
    /// local record; an unknown id is then a no-op.
    #[instrument(skip_all, fields(%id))]
    pub async fn update(&mut self, id: RecordId, patch: RecordPatch) -> SyncOutcome {
        if patch.is_empty() {
            debug!("Empty patch, nothing to send");
            return SyncOutcome::Confirmed;
        }
        debug!(?patch, "update called");

        match self.remote.update(id.clone(), patch.clone()).await {
            Ok(row) => {
                if let Err(e) = self.refresh().await {
                    warn!(error = %e, "Reload after update failed, applying returned row");
                    let record = InventoryRecord::from(row);
                    if let Some(item) = self.items.iter_mut().find(|item| item.id == record.id) {
                        *item = record;
                    }
                }
                SyncOutcome::Confirmed
            }
            Err(e) => {
                warn!(error = %e, "Update failed, merging locally");
                match self.items.iter_mut().find(|item| item.id == id) {
                    Some(item) => {
                        item.merge(&patch);
                        info!("Merged update into local record");
                    }
                    None => debug!("No local record to merge into"),
                }
                SyncOutcome::LocalFallback
            }
        }
    }

    /// Deletes record `id`. The local copy goes away whatever the table says.
    #[instrument(skip_all, fields(%id))]
    pub async fn delete(&mut self, id: RecordId) -> SyncOutcome {
        let outcome = match self.remote.delete(id.clone()).await {
            Ok(()) => SyncOutcome::Confirmed,
            Err(e) => {
                warn!(error = %e, "Delete failed, removing locally anyway");
                SyncOutcome::LocalFallback
            }
        };
        self.items.retain(|item| item.id != id);
        outcome
    }

    /// Deletes every record in `ids`. Ids that match nothing are ignored.
    #[instrument(skip_all, fields(count = ids.len()))]
    pub async fn bulk_delete(&mut self, ids: &[RecordId]) -> SyncOutcome {
        if ids.is_empty() {
            return SyncOutcome::Confirmed;
        }
        let outcome = match self.remote.delete_many(ids.to_vec()).await {
            Ok(()) => SyncOutcome::Confirmed,
            Err(e) => {
                warn!(error = %e, "Bulk delete failed, removing locally anyway");
                SyncOutcome::LocalFallback
            }
        };
        let doomed: HashSet<&RecordId> = ids.iter().collect();
        let before = self.items.len();
        self.items.retain(|item| !doomed.contains(&item.id));
        info!(removed = before - self.items.len(), "Removed records");
        outcome
    }

    /// Adds a batch of records in one insert.
    ///
    /// # Errors
    /// - `MissingMaterialAt`: some draft has no material. Nothing is sent.
    #[instrument(skip_all, fields(count = drafts.len()))]
    pub async fn import(&mut self, drafts: Vec<RecordDraft>) -> Result<SyncOutcome, InventoryError> {
        if let Some(row) = drafts.iter().position(|draft| !draft.has_material()) {
            return Err(InventoryError::MissingMaterialAt { row });
        }
        if drafts.is_empty() {
            return Ok(SyncOutcome::Confirmed);
        }
        let inserts: Vec<InventoryInsert> =
            drafts.into_iter().map(RecordDraft::into_insert).collect();

        match self.remote.insert(inserts.clone()).await {
            Ok(rows) => {
                self.after_insert(rows).await;
                Ok(SyncOutcome::Confirmed)
            }
            Err(e) => {
                warn!(error = %e, "Batch insert failed, keeping records locally");
                self.prepend_local(inserts);
                Ok(SyncOutcome::LocalFallback)
            }
        }
    }

    /// Reads the first sheet of an xlsx workbook and imports its rows as
    /// records of `category`.
    pub async fn import_workbook(
        &mut self,
        bytes: &[u8],
        category: Category,
    ) -> Result<SyncOutcome, InventoryError> {
        let drafts = spreadsheet::read_drafts(bytes, category)?;
        info!(%category, rows = drafts.len(), "Read workbook");
        self.import(drafts).await
    }

    /// Writes the records of `category` to an xlsx workbook.
    pub fn export_category(&self, category: Category) -> Result<Vec<u8>, InventoryError> {
        let records = self.records_in(category);
        Ok(spreadsheet::write_workbook(&records, category)?)
    }

    // ---- private helpers ----

    async fn refresh(&mut self) -> Result<(), StoreError> {
        match self.remote.select(self.row_limit).await {
            Ok(rows) => {
                self.items = rows.into_iter().map(InventoryRecord::from).collect();
                self.state = ConnectionState::Online;
                self.last_error = None;
                info!(count = self.items.len(), "Loaded items");
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Offline;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reloads after a confirmed insert; if that fails, shows the rows the
    /// table returned.
    async fn after_insert(&mut self, rows: Vec<InventoryRow>) {
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Reload after insert failed, applying returned rows");
            let fresh: Vec<InventoryRecord> = rows.into_iter().map(InventoryRecord::from).collect();
            let ids: HashSet<&RecordId> = fresh.iter().map(|record| &record.id).collect();
            self.items.retain(|item| !ids.contains(&item.id));
            self.items.splice(0..0, fresh);
        }
    }

    fn prepend_local(&mut self, inserts: Vec<InventoryInsert>) {
        let mut taken: HashSet<RecordId> = self.items.iter().map(|item| item.id.clone()).collect();
        let records: Vec<InventoryRecord> = inserts
            .iter()
            .map(|insert| {
                let id = local_id::generate(|id| taken.contains(id));
                taken.insert(id.clone());
                InventoryRecord::from_insert(id, insert)
            })
            .collect();
        info!(count = records.len(), "Applied local fallback");
        self.items.splice(0..0, records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTable;
    use crate::inventory_table;

    async fn local_store() -> InventoryStore {
        let (actor, client) = inventory_table::new();
        tokio::spawn(actor.run());
        InventoryStore::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_add_and_reload_against_local_table() {
        let mut store = local_store().await;
        assert_eq!(store.state(), ConnectionState::Idle);

        let outcome = store
            .add(RecordDraft::new(Category::Ink, "Tinta Azul Royal").with_quantity(50))
            .await
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Confirmed);
        assert_eq!(store.state(), ConnectionState::Online);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id.as_str(), "1");

        store
            .add(RecordDraft::new(Category::Fiber, "Kevlar 49"))
            .await
            .unwrap();
        assert_eq!(store.items()[0].material, "Kevlar 49");
        assert_eq!(store.records_in(Category::Ink).len(), 1);
        assert!(store.get(&RecordId::from(2)).is_some());
    }

    #[tokio::test]
    async fn test_add_without_material_is_rejected() {
        let mut store = local_store().await;
        let result = store.add(RecordDraft::new(Category::Ink, " ")).await;
        assert!(matches!(result, Err(InventoryError::MissingMaterial)));
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_import_reports_offending_row() {
        let mut store = local_store().await;
        let result = store
            .import(vec![
                RecordDraft::new(Category::Ink, "A"),
                RecordDraft::new(Category::Ink, ""),
            ])
            .await;
        assert!(matches!(
            result,
            Err(InventoryError::MissingMaterialAt { row: 1 })
        ));
    }

    #[tokio::test]
    async fn test_confirmed_insert_survives_failed_reload() {
        let mut mock = MockTable::<InventoryRow>::new();
        let row: InventoryRow = serde_json::from_value(serde_json::json!({
            "id": 99, "category": "INK", "material": "Tinta Vermelha", "qtd": 12
        }))
        .unwrap();
        mock.expect_insert().return_ok(vec![row]);
        mock.expect_select().return_err(StoreError::ActorClosed);

        let mut store = InventoryStore::new(Arc::new(mock.client()));
        let outcome = store
            .add(RecordDraft::new(Category::Ink, "Tinta Vermelha"))
            .await
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Confirmed);
        assert_eq!(store.items()[0].id, RecordId::from(99));
        assert_eq!(store.state(), ConnectionState::Offline);
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_patch_sends_nothing() {
        let mock = MockTable::<InventoryRow>::new();
        let mut store = InventoryStore::new(Arc::new(mock.client()));

        let outcome = store.update(RecordId::from(1), RecordPatch::default()).await;
        assert_eq!(outcome, SyncOutcome::Confirmed);
        mock.verify();
    }
}
