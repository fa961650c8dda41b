//! In-memory implementation of DocumentStore for testing and development

use crate::core::{DocumentStore, Entity, FieldUpdates, Filter};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory document store
///
/// Records are kept in insertion order so listings behave like a document
/// collection scanned in natural order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    records: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T> InMemoryStore<T> {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn matches<T: Entity>(record: &T, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        _ => filter.accepts(|field| record.field_value(field)),
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for InMemoryStore<T> {
    async fn insert(&self, record: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.contains_key(record.id()) {
            return Err(anyhow!(
                "Duplicate {} '{}' in {}",
                T::id_field(),
                record.id(),
                T::resource_name()
            ));
        }

        records.insert(record.id().to_string(), record.clone());

        Ok(record)
    }

    async fn insert_many(&self, batch: Vec<T>) -> Result<Vec<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // Check the whole batch before writing so a failure stores nothing
        let mut seen = std::collections::HashSet::new();
        for record in &batch {
            if records.contains_key(record.id()) || !seen.insert(record.id()) {
                return Err(anyhow!(
                    "Duplicate {} '{}' in {}",
                    T::id_field(),
                    record.id(),
                    T::resource_name()
                ));
            }
        }

        for record in &batch {
            records.insert(record.id().to_string(), record.clone());
        }

        Ok(batch)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .values()
            .filter(|record| matches(*record, filter))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .values()
            .find(|record| matches(*record, filter))
            .cloned())
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .values()
            .filter(|record| matches(*record, filter))
            .count() as u64)
    }

    async fn update_fields(&self, id: &str, updates: FieldUpdates) -> Result<Option<T>> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(current) = records.get_mut(id) else {
            return Ok(None);
        };

        let mut document = serde_json::to_value(&*current)
            .map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
        updates.apply_to_json(&mut document);
        let updated: T = serde_json::from_value(document)
            .map_err(|e| anyhow!("Update produced an invalid {}: {}", T::resource_name(), e))?;

        *current = updated.clone();

        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Dish {
        dish_id: String,
        menu_id: String,
        price: f64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    crate::impl_entity!(Dish, "dish", dish_id);

    fn dish(id: &str, menu: &str, price: f64) -> Dish {
        let now = Utc::now();
        Dish {
            dish_id: id.into(),
            menu_id: menu.into(),
            price,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for (id, menu) in [("c", "m1"), ("a", "m2"), ("b", "m1")] {
            store.insert(dish(id, menu, 1.0)).await.unwrap();
        }

        let found = store.find(&Filter::eq("menu_id", "m1")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.dish_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_insert_many_is_all_or_nothing() {
        let store = InMemoryStore::new();
        store.insert(dish("a", "m1", 1.0)).await.unwrap();

        let result = store
            .insert_many(vec![dish("b", "m1", 1.0), dish("a", "m1", 2.0)])
            .await;
        assert!(result.is_err());
        assert_eq!(store.count(&Filter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_fields_touches_listed_fields_only() {
        let store = InMemoryStore::new();
        store.insert(dish("a", "m1", 1.0)).await.unwrap();

        let mut updates = FieldUpdates::new();
        updates.set("price", 2.5);
        let updated = store.update_fields("a", updates).await.unwrap().unwrap();

        assert_eq!(updated.price, 2.5);
        assert_eq!(updated.menu_id, "m1");
        assert_eq!(store.get("a").await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_record_returns_none() {
        let store: InMemoryStore<Dish> = InMemoryStore::new();
        let mut updates = FieldUpdates::new();
        updates.set("price", 2.5);
        assert!(store.update_fields("nope", updates).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_with_wrong_type_is_rejected() {
        let store = InMemoryStore::new();
        store.insert(dish("a", "m1", 1.0)).await.unwrap();

        let mut updates = FieldUpdates::new();
        updates.set("price", "free");
        assert!(store.update_fields("a", updates).await.is_err());
        assert_eq!(store.get("a").await.unwrap().unwrap().price, 1.0);
    }
}
