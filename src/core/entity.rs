//! Entity trait shared by every persisted record

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all persisted records.
///
/// Every record lives in its own collection and is addressed by an opaque
/// string identifier stored under a record-specific field (`food_id`,
/// `order_id`, ...). Identifiers are generated once at creation time and
/// never reused.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Collection name in the document store (e.g. "food", "orderItem")
    fn resource_name() -> &'static str;

    /// Name of the identifier field (e.g. "food_id")
    fn id_field() -> &'static str;

    /// Get the identifier of this record
    fn id(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a top-level field by name
    ///
    /// Values are read through the record's JSON representation, so field
    /// names are the serialized names. Unknown fields return `None`; unset
    /// optional fields return `Some(FieldValue::Null)`.
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let json = serde_json::to_value(self).ok()?;
        json.get(field).and_then(FieldValue::from_json)
    }
}

/// Generate a fresh record identifier (32 lowercase hex characters)
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Implement [`Entity`] for a record struct
///
/// The struct must carry `created_at` / `updated_at` timestamps and the
/// named identifier field.
///
/// ```rust,ignore
/// impl_entity!(Food, "food", food_id);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $collection:expr, $id_field:ident) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $collection
            }

            fn id_field() -> &'static str {
                stringify!($id_field)
            }

            fn id(&self) -> &str {
                &self.$id_field
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct Sample {
        sample_id: String,
        label: Option<String>,
        seats: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    crate::impl_entity!(Sample, "sample", sample_id);

    fn sample() -> Sample {
        let now = Utc::now();
        Sample {
            sample_id: new_id(),
            label: None,
            seats: 4,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_entity_metadata() {
        let record = sample();
        assert_eq!(Sample::resource_name(), "sample");
        assert_eq!(Sample::id_field(), "sample_id");
        assert_eq!(record.id(), record.sample_id);
    }

    #[test]
    fn test_field_value_reads_serialized_fields() {
        let record = sample();
        assert_eq!(record.field_value("seats"), Some(FieldValue::Integer(4)));
        assert_eq!(record.field_value("label"), Some(FieldValue::Null));
        assert_eq!(record.field_value("missing"), None);
    }

    #[test]
    fn test_new_id_is_opaque_hex() {
        let a = new_id();
        let b = new_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
