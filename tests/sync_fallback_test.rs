use mezzanine_stock::framework::mock::{
    create_mock_table, expect_delete_many, expect_select, expect_update, MockTable,
};
use mezzanine_stock::framework::StoreError;
use mezzanine_stock::model::{Category, InventoryRow, RecordDraft, RecordId, RecordPatch};
use mezzanine_stock::sync::{local_id, ConnectionState, InventoryStore, SyncOutcome};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn row(id: u32, category: &str, material: &str, qtd: u64) -> InventoryRow {
    serde_json::from_value(json!({
        "id": id,
        "created_at": "2024-01-10T12:00:00Z",
        "category": category,
        "material": material,
        "qtd": qtd,
        "status": "EM ESTOQUE"
    }))
    .unwrap()
}

fn unreachable() -> StoreError {
    StoreError::Api {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// A store already loaded with two records, ids 2 and 1, newest first.
async fn seeded(mock: &mut MockTable<InventoryRow>) -> InventoryStore {
    mock.expect_select().return_ok(vec![
        row(2, "FIBER", "Kevlar 49", 40),
        row(1, "INK", "Tinta Azul Royal", 50),
    ]);
    let mut store = InventoryStore::new(Arc::new(mock.client()));
    assert_eq!(store.reload().await, SyncOutcome::Confirmed);
    assert_eq!(store.state(), ConnectionState::Online);
    store
}

/// Pattern: scripted table failure, local fallback observed in the collection.
#[tokio::test]
async fn test_add_falls_back_to_local_record() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_insert().return_err(unreachable());

    let outcome = store
        .add(RecordDraft::new(Category::Ink, "X"))
        .await
        .unwrap();

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert_eq!(store.items().len(), 3);
    let first = &store.items()[0];
    assert_eq!(first.category, Category::Ink);
    assert_eq!(first.material, "X");
    assert_eq!(first.quantity, 0);
    assert_eq!(first.status, "EM ESTOQUE");
    assert!(!first.id.as_str().is_empty());
    assert!(local_id::is_local(&first.id));
    assert!(store.items()[1..].iter().all(|item| item.id != first.id));
    mock.verify();
}

#[tokio::test]
async fn test_fallback_ids_stay_unique() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = InventoryStore::new(Arc::new(mock.client()));

    for i in 0..20 {
        mock.expect_insert().return_err(unreachable());
        store
            .add(RecordDraft::new(Category::Fiber, format!("Fibra {i}")))
            .await
            .unwrap();
    }
    mock.expect_insert().return_err(unreachable());
    let batch: Vec<RecordDraft> = (0..30)
        .map(|i| RecordDraft::new(Category::Ink, format!("Tinta {i}")))
        .collect();
    store.import(batch).await.unwrap();

    let ids: HashSet<&RecordId> = store.items().iter().map(|item| &item.id).collect();
    assert_eq!(store.items().len(), 50);
    assert_eq!(ids.len(), 50);
    mock.verify();
}

#[tokio::test]
async fn test_import_fallback_keeps_batch_order_on_top() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_insert().return_err(unreachable());

    let outcome = store
        .import(vec![
            RecordDraft::new(Category::Packaging, "Caixa 40x40").with_room("S1"),
            RecordDraft::new(Category::Packaging, "Fita Adesiva"),
        ])
        .await
        .unwrap();

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    let materials: Vec<&str> = store.items().iter().map(|item| item.material.as_str()).collect();
    assert_eq!(
        materials,
        ["Caixa 40x40", "Fita Adesiva", "Kevlar 49", "Tinta Azul Royal"]
    );
    // packaging has no location
    assert_eq!(store.items()[0].room, None);
    mock.verify();
}

#[tokio::test]
async fn test_update_fallback_merges_fields() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_update(RecordId::from(1)).return_err(unreachable());

    let patch = RecordPatch {
        quantity: Some(99),
        status: Some("PAGO".to_string()),
        ..RecordPatch::default()
    };
    let outcome = store.update(RecordId::from(1), patch).await;

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    let record = store.get(&RecordId::from(1)).unwrap();
    assert_eq!(record.quantity, 99);
    assert_eq!(record.status, "PAGO");
    assert_eq!(record.material, "Tinta Azul Royal");
    mock.verify();
}

#[tokio::test]
async fn test_update_fallback_for_unknown_id_changes_nothing() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    let before = store.items().to_vec();
    mock.expect_update(RecordId::from(404)).return_err(unreachable());

    let patch = RecordPatch {
        quantity: Some(1),
        ..RecordPatch::default()
    };
    let outcome = store.update(RecordId::from(404), patch).await;

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert_eq!(store.items(), before.as_slice());
    mock.verify();
}

#[tokio::test]
async fn test_confirmed_update_reloads() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_update(RecordId::from(2))
        .return_ok(row(2, "FIBER", "Kevlar 49", 10));
    mock.expect_select().return_ok(vec![
        row(2, "FIBER", "Kevlar 49", 10),
        row(1, "INK", "Tinta Azul Royal", 50),
    ]);

    let patch = RecordPatch {
        quantity: Some(10),
        ..RecordPatch::default()
    };
    assert_eq!(
        store.update(RecordId::from(2), patch).await,
        SyncOutcome::Confirmed
    );
    assert_eq!(store.get(&RecordId::from(2)).unwrap().quantity, 10);
    mock.verify();
}

#[tokio::test]
async fn test_delete_removes_locally_even_when_table_fails() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_delete(RecordId::from(2)).return_err(unreachable());

    let outcome = store.delete(RecordId::from(2)).await;

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert!(store.get(&RecordId::from(2)).is_none());
    assert_eq!(store.items().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_bulk_delete_ignores_missing_ids() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_delete_many().return_ok(());

    let outcome = store
        .bulk_delete(&[RecordId::from(1), RecordId::from(404)])
        .await;

    assert_eq!(outcome, SyncOutcome::Confirmed);
    let ids: Vec<&str> = store.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["2"]);
    mock.verify();
}

#[tokio::test]
async fn test_bulk_delete_removes_locally_when_table_fails() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_delete_many().return_err(unreachable());

    let outcome = store
        .bulk_delete(&[RecordId::from(1), RecordId::from(2)])
        .await;

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert!(store.items().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_failed_reload_keeps_items_and_goes_offline() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_select().return_err(unreachable());

    let outcome = store.reload().await;

    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert_eq!(store.items().len(), 2);
    assert_eq!(store.state(), ConnectionState::Offline);
    assert!(store.last_error().unwrap().contains("503"));

    mock.expect_select().return_ok(vec![row(3, "INK", "Tinta Preta", 1)]);
    store.reload().await;
    assert_eq!(store.state(), ConnectionState::Online);
    assert_eq!(store.last_error(), None);
    assert_eq!(store.items().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_local_records_are_replaced_by_next_reload() {
    let mut mock = MockTable::<InventoryRow>::new();
    let mut store = seeded(&mut mock).await;
    mock.expect_insert().return_err(unreachable());
    store
        .add(RecordDraft::new(Category::Ink, "Tinta Verde"))
        .await
        .unwrap();
    assert_eq!(store.items().len(), 3);

    mock.expect_select().return_ok(vec![row(1, "INK", "Tinta Azul Royal", 50)]);
    store.reload().await;

    assert_eq!(store.items().len(), 1);
    assert!(store.items().iter().all(|item| !local_id::is_local(&item.id)));
    mock.verify();
}

/// Pattern: raw requests. The store runs in its own task while the test
/// inspects each request and answers it by hand.
#[tokio::test]
async fn test_store_requests_seen_by_the_table() {
    let (client, mut receiver) = create_mock_table::<InventoryRow>(10);
    let store = InventoryStore::new(Arc::new(client)).with_row_limit(Some(1500));

    // Reload asks for the configured row cap.
    let reload = tokio::spawn(async move {
        let mut store = store;
        let outcome = store.reload().await;
        (store, outcome)
    });
    let (limit, responder) = expect_select(&mut receiver)
        .await
        .expect("Expected Select request");
    assert_eq!(limit, Some(1500));
    responder
        .send(Ok(vec![
            row(2, "FIBER", "Kevlar 49", 40),
            row(1, "INK", "Tinta Azul Royal", 50),
        ]))
        .unwrap();
    let (store, outcome) = reload.await.unwrap();
    assert_eq!(outcome, SyncOutcome::Confirmed);

    // Update carries only the set fields; a refusal merges them locally.
    let update = tokio::spawn(async move {
        let mut store = store;
        let patch = RecordPatch {
            room: Some("S2".to_string()),
            ..RecordPatch::default()
        };
        let outcome = store.update(RecordId::from(2), patch).await;
        (store, outcome)
    });
    let (id, patch, responder) = expect_update(&mut receiver)
        .await
        .expect("Expected Update request");
    assert_eq!(id, RecordId::from(2));
    assert_eq!(patch.room.as_deref(), Some("S2"));
    assert_eq!(patch.quantity, None);
    responder.send(Err(unreachable())).unwrap();
    let (store, outcome) = update.await.unwrap();
    assert_eq!(outcome, SyncOutcome::LocalFallback);
    assert_eq!(
        store.get(&RecordId::from(2)).unwrap().room.as_deref(),
        Some("S2")
    );

    // Bulk delete forwards every id, known or not.
    let delete = tokio::spawn(async move {
        let mut store = store;
        let outcome = store
            .bulk_delete(&[RecordId::from(1), RecordId::from(404)])
            .await;
        (store, outcome)
    });
    let (ids, responder) = expect_delete_many(&mut receiver)
        .await
        .expect("Expected DeleteMany request");
    assert_eq!(ids, [RecordId::from(1), RecordId::from(404)]);
    responder.send(Ok(())).unwrap();
    let (store, outcome) = delete.await.unwrap();
    assert_eq!(outcome, SyncOutcome::Confirmed);
    assert_eq!(store.items().len(), 1);
}
