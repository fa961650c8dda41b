//! Integration tests for InMemoryStore using the storage test harness.

#[macro_use]
mod storage_harness;

use restaurant::prelude::*;
use storage_harness::*;

document_store_tests!(Stores::in_memory());

#[tokio::test]
async fn test_insert_duplicate_id_is_rejected() {
    let store = InMemoryStore::<Table>::new();
    let table = table_record(1);
    store.insert(table.clone()).await.unwrap();

    assert!(store.insert(table).await.is_err());
    assert_eq!(store.count(&Filter::All).await.unwrap(), 1);
}

#[tokio::test]
async fn test_insert_many_is_all_or_nothing() {
    let store = InMemoryStore::<OrderItem>::new();
    let existing = store.insert(item_record("o1", "f1", "S", 1.0)).await.unwrap();

    let result = store
        .insert_many(vec![item_record("o1", "f2", "M", 2.0), existing])
        .await;

    assert!(result.is_err());
    assert_eq!(store.count(&Filter::All).await.unwrap(), 1);
}
