//! Single-entity persistence over the document stores
//!
//! Catalog (menus, foods, tables) and user reads are thin orchestration:
//! validate the payload, check the records it points to, write. The
//! helpers below carry the lookup and error mapping shared with billing.

pub mod catalog;
pub mod users;

pub use catalog::CatalogService;
pub use users::UserService;

use crate::core::error::{EntityError, RestaurantResult, StoreResultExt};
use crate::core::{DocumentStore, Entity, Filter};
use crate::entities::FieldPatch;
use chrono::Utc;

/// Fetch a record by id, failing with not-found when it does not exist
pub async fn fetch<T: Entity>(store: &dyn DocumentStore<T>, id: &str) -> RestaurantResult<T> {
    store
        .get(id)
        .await
        .in_store(T::resource_name(), "get")?
        .ok_or_else(|| EntityError::not_found(T::resource_name(), id).into())
}

/// Every record of a collection in natural order
pub async fn list_all<T: Entity>(store: &dyn DocumentStore<T>) -> RestaurantResult<Vec<T>> {
    Ok(store
        .find(&Filter::All)
        .await
        .in_store(T::resource_name(), "find")?)
}

/// Check that a record referenced by a payload exists
///
/// A dangling reference is a missing-relation failure, not a client error.
pub async fn require_relation<T: Entity>(
    store: &dyn DocumentStore<T>,
    id: &str,
) -> RestaurantResult<T> {
    store
        .get(id)
        .await
        .in_store(T::resource_name(), "get")?
        .ok_or_else(|| EntityError::missing_relation(T::resource_name(), id).into())
}

/// Apply a patch to a stored record
pub async fn apply_patch<T, P>(store: &dyn DocumentStore<T>, id: &str, patch: P) -> RestaurantResult<T>
where
    T: Entity,
    P: FieldPatch,
{
    let updates = patch.into_updates(Utc::now())?;
    let updated = store
        .update_fields(id, updates)
        .await
        .in_store(T::resource_name(), "update")?
        .ok_or_else(|| EntityError::not_found(T::resource_name(), id))?;

    tracing::debug!(collection = T::resource_name(), id, "record updated");
    Ok(updated)
}

/// Insert a freshly built record
pub async fn insert<T: Entity>(store: &dyn DocumentStore<T>, record: T) -> RestaurantResult<T> {
    let created = store
        .insert(record)
        .await
        .in_store(T::resource_name(), "insert")?;

    tracing::info!(collection = T::resource_name(), id = created.id(), "record created");
    Ok(created)
}
