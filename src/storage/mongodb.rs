//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStore<T>`, a [`DocumentStore`] backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per record type, named by `T::resource_name()` ("food",
//! "orderItem", ...). Records are addressed by their own identifier field
//! (`food_id`, `order_item_id`, ...); MongoDB's `_id` is left to the driver
//! and stripped on the way out.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. Timestamps are therefore stored as
//! RFC 3339 strings, the same representation the filters and field updates
//! produce.

use crate::core::{DocumentStore, Entity, FieldUpdates, FieldValue, Filter};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    match bson_val {
        Bson::Document(d) => Ok(d),
        _ => Err(anyhow!("Expected BSON document, got non-object")),
    }
}

/// Convert a BSON Document back into a serde_json::Value, dropping `_id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    doc.remove("_id");
    Bson::Document(doc).into_relaxed_extjson()
}

fn field_bson(value: &FieldValue) -> Result<Bson> {
    mongodb::bson::to_bson(&value.to_json())
        .map_err(|e| anyhow!("Failed to convert field value to BSON: {}", e))
}

/// Translate a store filter into a MongoDB query document
fn filter_document(filter: &Filter) -> Result<Document> {
    Ok(match filter {
        Filter::All => doc! {},
        Filter::Eq(field, value) => {
            let mut query = Document::new();
            query.insert(field.as_str(), field_bson(value)?);
            query
        }
        Filter::In(field, values) => {
            let candidates = values.iter().map(field_bson).collect::<Result<Vec<_>>>()?;
            let mut query = Document::new();
            query.insert(field.as_str(), doc! { "$in": candidates });
            query
        }
    })
}

/// Translate field updates into a `$set` document
fn set_document(updates: &FieldUpdates) -> Result<Document> {
    let mut set = Document::new();
    for (field, value) in updates.iter() {
        set.insert(field, field_bson(value)?);
    }
    Ok(doc! { "$set": set })
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Generic document store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use restaurant::storage::MongoStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("restaurant");
/// let foods = MongoStore::<Food>::new(db);
/// let food = foods.insert(food).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoStore<T> {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity> MongoStore<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn record_to_document(record: &T) -> Result<Document> {
        let json = serde_json::to_value(record)
            .map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
        json_to_document(json)
    }

    fn document_to_record(doc: Document) -> Result<T> {
        serde_json::from_value(document_to_json(doc))
            .map_err(|e| anyhow!("Failed to deserialize {} document: {}", T::resource_name(), e))
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MongoStore<T> {
    async fn insert(&self, record: T) -> Result<T> {
        let doc = Self::record_to_document(&record)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert record: {}", e))?;

        Ok(record)
    }

    async fn insert_many(&self, records: Vec<T>) -> Result<Vec<T>> {
        if records.is_empty() {
            return Ok(records);
        }

        let docs = records
            .iter()
            .map(Self::record_to_document)
            .collect::<Result<Vec<_>>>()?;

        self.collection()
            .insert_many(docs)
            .await
            .map_err(|e| anyhow!("Failed to insert records: {}", e))?;

        Ok(records)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter_document(filter)?)
            .await
            .map_err(|e| anyhow!("Failed to query records: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect records: {}", e))?;

        docs.into_iter().map(Self::document_to_record).collect()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(filter_document(filter)?)
            .await
            .map_err(|e| anyhow!("Failed to fetch record: {}", e))?;

        doc.map(Self::document_to_record).transpose()
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        self.collection()
            .count_documents(filter_document(filter)?)
            .await
            .map_err(|e| anyhow!("Failed to count records: {}", e))
    }

    async fn update_fields(&self, id: &str, updates: FieldUpdates) -> Result<Option<T>> {
        let filter = filter_document(&Filter::eq(T::id_field(), id))?;

        let doc = self
            .collection()
            .find_one_and_update(filter, set_document(&updates)?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update record: {}", e))?;

        doc.map(Self::document_to_record).transpose()
    }
}
