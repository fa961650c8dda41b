//! Document store adapter trait

use crate::core::entity::Entity;
use crate::core::field::{FieldUpdates, Filter};
use anyhow::Result;
use async_trait::async_trait;

/// Generic document store for one entity collection
///
/// Implementations provide typed access to a single collection. The billing
/// and catalog layers only ever talk to this trait, so any backend able to
/// filter by field equality and apply `$set`-style updates can host the
/// service.
#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync {
    /// Insert a single record
    async fn insert(&self, record: T) -> Result<T>;

    /// Insert a batch of records in one operation
    ///
    /// Either every record is stored or the call fails.
    async fn insert_many(&self, records: Vec<T>) -> Result<Vec<T>>;

    /// Fetch every record matching the filter, in natural (insertion) order
    async fn find(&self, filter: &Filter) -> Result<Vec<T>>;

    /// Fetch the first record matching the filter
    async fn find_one(&self, filter: &Filter) -> Result<Option<T>>;

    /// Fetch a record by its identifier
    async fn get(&self, id: &str) -> Result<Option<T>> {
        self.find_one(&Filter::eq(T::id_field(), id)).await
    }

    /// Count the records matching the filter
    async fn count(&self, filter: &Filter) -> Result<u64>;

    /// Apply field assignments to the record with the given identifier
    ///
    /// Returns the updated record, or `None` when no record has that id.
    async fn update_fields(&self, id: &str, updates: FieldUpdates) -> Result<Option<T>>;
}
