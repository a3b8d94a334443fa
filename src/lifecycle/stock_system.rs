use crate::framework::{RemoteTable, RestTable};
use crate::lifecycle::config::{StoreBackend, StoreConfig};
use crate::model::InventoryRow;
use crate::sync::InventoryStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The runtime root of the inventory console.
///
/// `StockSystem` is responsible for:
/// - **Backend Selection**: the hosted table, or an in-process table task
/// - **Wiring**: handing the chosen table to the [`InventoryStore`]
/// - **Shutdown**: stopping any task it started
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::from_env();
/// let mut system = StockSystem::new(&config);
///
/// system.store.reload().await;
/// println!("{} records", system.store.items().len());
///
/// system.shutdown().await?;
/// ```
pub struct StockSystem {
    /// The inventory view-model.
    pub store: InventoryStore,

    /// Task handles for tables running in-process (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StockSystem {
    /// Builds the system described by `config`.
    ///
    /// Must be called inside a Tokio runtime when the backend is
    /// [`StoreBackend::Local`], since the table task is spawned here.
    pub fn new(config: &StoreConfig) -> Self {
        let (remote, handles): (Arc<dyn RemoteTable<InventoryRow>>, _) = match config.backend {
            StoreBackend::Remote => {
                if config.is_placeholder() {
                    warn!("Using placeholder table URL, every write will stay local");
                }
                info!(url = %config.url, "Using hosted table");
                let table = RestTable::<InventoryRow>::new(&config.url, &config.api_key);
                (Arc::new(table), Vec::new())
            }
            StoreBackend::Local => {
                info!("Using in-process table");
                let (actor, client) = crate::inventory_table::new();
                let handle = tokio::spawn(actor.run());
                (Arc::new(client), vec![handle])
            }
        };

        Self {
            store: InventoryStore::new(remote).with_row_limit(config.row_limit),
            handles,
        }
    }

    /// Builds the system around an existing table.
    pub fn with_remote(remote: Arc<dyn RemoteTable<InventoryRow>>) -> Self {
        Self {
            store: InventoryStore::new(remote),
            handles: Vec::new(),
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the store closes the in-process table's channel; the table
    /// task then leaves its loop and is awaited here.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every task stopped cleanly
    /// - `Err(String)` if a task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // =====================================================================
        // Step 1: Close the table channel by dropping the store
        // =====================================================================

        drop(self.store);

        // =====================================================================
        // Step 2: Wait for table tasks to complete
        // =====================================================================

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, RecordDraft};
    use crate::sync::{ConnectionState, SyncOutcome};

    #[tokio::test]
    async fn test_local_backend_roundtrip_and_shutdown() {
        let config = StoreConfig {
            backend: StoreBackend::Local,
            ..StoreConfig::default()
        };
        let mut system = StockSystem::new(&config);

        assert_eq!(system.store.reload().await, SyncOutcome::Confirmed);
        assert_eq!(system.store.state(), ConnectionState::Online);

        let outcome = system
            .store
            .add(RecordDraft::new(Category::Ink, "Tinta Preta"))
            .await
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Confirmed);
        assert_eq!(system.store.items()[0].id.as_str(), "1");

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_row_limit_reaches_the_store() {
        let config = StoreConfig {
            backend: StoreBackend::Local,
            row_limit: Some(1),
            ..StoreConfig::default()
        };
        let mut system = StockSystem::new(&config);

        system
            .store
            .import(vec![
                RecordDraft::new(Category::Ink, "Tinta A"),
                RecordDraft::new(Category::Ink, "Tinta B"),
            ])
            .await
            .unwrap();
        assert_eq!(system.store.items().len(), 1);

        system.shutdown().await.unwrap();
    }
}
