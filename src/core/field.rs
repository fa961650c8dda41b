//! Field values, store filters and field-level updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// JSON representation used for comparisons and document writes
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::DateTime(dt) => serde_json::to_value(dt).unwrap_or(Value::Null),
            FieldValue::Null => Value::Null,
        }
    }

    /// Read a scalar JSON value back into a field value
    ///
    /// Arrays and objects have no field representation and yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Integer)
                .or_else(|| n.as_f64().map(FieldValue::Float)),
            Value::String(s) => Some(FieldValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Compare two values the way the document store does: by JSON value,
    /// with integers and floats of equal magnitude treated as equal.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Float(b))
            | (FieldValue::Float(b), FieldValue::Integer(a)) => (*a as f64) == *b,
            _ => self.to_json() == other.to_json(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Record selection understood by every store backend
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every record of the collection
    All,
    /// Records whose field equals the value
    Eq(String, FieldValue),
    /// Records whose field equals any of the values
    In(String, Vec<FieldValue>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<FieldValue>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn any_of<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        Filter::In(field.to_string(), values.into_iter().map(Into::into).collect())
    }

    /// Evaluate the filter against a field accessor
    pub fn accepts(&self, field_value: impl Fn(&str) -> Option<FieldValue>) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => {
                field_value(field).is_some_and(|actual| actual.matches(expected))
            }
            Filter::In(field, candidates) => field_value(field)
                .is_some_and(|actual| candidates.iter().any(|c| actual.matches(c))),
        }
    }
}

/// An ordered set of field assignments (`$set` semantics)
///
/// Built from an entity patch: only the fields present in the request are
/// listed, so absent fields are left untouched in the stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    fields: Vec<(String, FieldValue)>,
}

impl FieldUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a field, replacing an earlier assignment of the same field
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field.to_string(), value)),
        }
        self
    }

    /// Assign a field only when a value is present
    pub fn set_if_some<V: Into<FieldValue>>(&mut self, field: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(field, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Apply the assignments to a JSON object in place
    pub fn apply_to_json(&self, target: &mut Value) {
        if let Some(object) = target.as_object_mut() {
            for (field, value) in &self.fields {
                object.insert(field.clone(), value.to_json());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_accessors() {
        let value = FieldValue::String("t1".to_string());
        assert_eq!(value.as_string(), Some("t1"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
        assert!(FieldValue::from(None::<String>).is_null());
    }

    #[test]
    fn test_integer_and_float_compare_by_magnitude() {
        assert!(FieldValue::Integer(7).matches(&FieldValue::Float(7.0)));
        assert!(!FieldValue::Integer(7).matches(&FieldValue::String("7".into())));
    }

    #[test]
    fn test_filter_eq_and_in() {
        let accessor = |field: &str| match field {
            "order_id" => Some(FieldValue::from("o-1")),
            "table_id" => Some(FieldValue::Null),
            _ => None,
        };

        assert!(Filter::All.accepts(accessor));
        assert!(Filter::eq("order_id", "o-1").accepts(accessor));
        assert!(!Filter::eq("order_id", "o-2").accepts(accessor));
        assert!(Filter::any_of("order_id", ["o-9", "o-1"]).accepts(accessor));
        assert!(!Filter::eq("unknown", "o-1").accepts(accessor));
        assert!(Filter::eq("table_id", FieldValue::Null).accepts(accessor));
    }

    #[test]
    fn test_field_updates_last_assignment_wins() {
        let mut updates = FieldUpdates::new();
        updates.set("price", 1.5).set("price", 2.25).set_if_some("name", None::<String>);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates.get("price"), Some(&FieldValue::Float(2.25)));
    }

    #[test]
    fn test_apply_to_json_only_touches_listed_fields() {
        let mut doc = json!({"food_id": "f1", "name": "Soup", "price": 4.0});
        let mut updates = FieldUpdates::new();
        updates.set("price", 4.5);
        updates.apply_to_json(&mut doc);

        assert_eq!(doc, json!({"food_id": "f1", "name": "Soup", "price": 4.5}));
    }

    #[test]
    fn test_from_json_rejects_composites() {
        assert_eq!(FieldValue::from_json(&json!([1, 2])), None);
        assert_eq!(FieldValue::from_json(&json!(3)), Some(FieldValue::Integer(3)));
        assert_eq!(FieldValue::from_json(&json!(3.5)), Some(FieldValue::Float(3.5)));
    }
}
