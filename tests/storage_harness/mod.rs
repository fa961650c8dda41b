//! Contract tests shared by every `DocumentStore` backend
//!
//! Invoke `document_store_tests!` with an expression producing a fresh,
//! empty [`Stores`] bundle:
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! document_store_tests!(Stores::in_memory());
//! ```

#![allow(dead_code)]

use chrono::Utc;
use restaurant::prelude::*;

/// A table record not yet stored
pub fn table_record(table_number: i64) -> Table {
    NewTable {
        number_of_guests: Some(2),
        table_number: Some(table_number),
    }
    .into_record(Utc::now())
    .unwrap()
}

/// An order item record of `order_id`, not yet stored
pub fn item_record(order_id: &str, food_id: &str, quantity: &str, price: f64) -> OrderItem {
    let mut line = NewOrderItem::new(food_id, quantity, price);
    line.order_id = Some(order_id.to_string());
    line.into_record(Utc::now()).unwrap()
}

#[macro_export]
macro_rules! document_store_tests {
    ($factory:expr) => {
        mod document_store_contract_tests {
            use super::*;
            use restaurant::prelude::*;

            #[tokio::test]
            async fn test_insert_and_get() {
                let stores = $factory;
                let table = table_record(7);

                let stored = stores.tables.insert(table.clone()).await.unwrap();
                assert_eq!(stored.table_id, table.table_id);

                let fetched = stores.tables.get(&table.table_id).await.unwrap();
                assert_eq!(fetched.map(|t| t.table_number), Some(7));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let stores = $factory;
                let fetched = stores.tables.get(&new_id()).await.unwrap();
                assert!(fetched.is_none());
            }

            #[tokio::test]
            async fn test_find_all_empty() {
                let stores = $factory;
                let tables = stores.tables.find(&Filter::All).await.unwrap();
                assert!(tables.is_empty());
                assert_eq!(stores.tables.count(&Filter::All).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_insert_many_keeps_order() {
                let stores = $factory;
                let batch = vec![
                    item_record("o1", "f1", "S", 1.0),
                    item_record("o1", "f2", "M", 2.0),
                    item_record("o1", "f3", "L", 3.0),
                ];
                let ids: Vec<String> = batch.iter().map(|i| i.order_item_id.clone()).collect();

                let stored = stores.order_items.insert_many(batch).await.unwrap();
                assert_eq!(stored.len(), 3);

                let found = stores
                    .order_items
                    .find(&Filter::eq("order_id", "o1"))
                    .await
                    .unwrap();
                let found_ids: Vec<String> = found.into_iter().map(|i| i.order_item_id).collect();
                assert_eq!(found_ids, ids);
            }

            #[tokio::test]
            async fn test_insert_many_empty_batch() {
                let stores = $factory;
                let stored = stores.order_items.insert_many(Vec::new()).await.unwrap();
                assert!(stored.is_empty());
            }

            #[tokio::test]
            async fn test_find_by_equality() {
                let stores = $factory;
                stores
                    .order_items
                    .insert_many(vec![
                        item_record("o1", "f1", "S", 1.0),
                        item_record("o2", "f1", "M", 2.0),
                        item_record("o1", "f2", "L", 3.0),
                    ])
                    .await
                    .unwrap();

                let of_o1 = stores
                    .order_items
                    .find(&Filter::eq("order_id", "o1"))
                    .await
                    .unwrap();
                assert_eq!(of_o1.len(), 2);
                assert!(of_o1.iter().all(|i| i.order_id == "o1"));

                let first = stores
                    .order_items
                    .find_one(&Filter::eq("order_id", "o2"))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(first.unit_price, 2.0);
            }

            #[tokio::test]
            async fn test_find_by_membership() {
                let stores = $factory;
                let a = stores.tables.insert(table_record(1)).await.unwrap();
                let _b = stores.tables.insert(table_record(2)).await.unwrap();
                let c = stores.tables.insert(table_record(3)).await.unwrap();

                let found = stores
                    .tables
                    .find(&Filter::any_of(
                        "table_id",
                        [a.table_id.as_str(), c.table_id.as_str(), "missing"],
                    ))
                    .await
                    .unwrap();
                let numbers: Vec<i64> = found.iter().map(|t| t.table_number).collect();
                assert_eq!(numbers, vec![1, 3]);
            }

            #[tokio::test]
            async fn test_count_with_filter() {
                let stores = $factory;
                stores.tables.insert(table_record(4)).await.unwrap();
                stores.tables.insert(table_record(4)).await.unwrap();
                stores.tables.insert(table_record(5)).await.unwrap();

                let fours = stores
                    .tables
                    .count(&Filter::eq("table_number", 4i64))
                    .await
                    .unwrap();
                assert_eq!(fours, 2);
                assert_eq!(stores.tables.count(&Filter::All).await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_update_fields_existing() {
                let stores = $factory;
                let table = stores.tables.insert(table_record(9)).await.unwrap();

                let mut updates = FieldUpdates::new();
                updates.set("number_of_guests", 6i64);
                let updated = stores
                    .tables
                    .update_fields(&table.table_id, updates)
                    .await
                    .unwrap()
                    .unwrap();

                assert_eq!(updated.number_of_guests, 6);
                assert_eq!(updated.table_number, 9);

                let fetched = stores.tables.get(&table.table_id).await.unwrap().unwrap();
                assert_eq!(fetched.number_of_guests, 6);
            }

            #[tokio::test]
            async fn test_update_fields_nonexistent() {
                let stores = $factory;
                let mut updates = FieldUpdates::new();
                updates.set("number_of_guests", 6i64);

                let updated = stores.tables.update_fields(&new_id(), updates).await.unwrap();
                assert!(updated.is_none());
                assert_eq!(stores.tables.count(&Filter::All).await.unwrap(), 0);
            }
        }
    };
}
