use super::{FieldPatch, one_of, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use crate::core::money::round_price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

const QUANTITIES: &[&str] = &["S", "M", "L"];

/// Portion size of an ordered dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Small => "S",
            Quantity::Medium => "M",
            Quantity::Large => "L",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "S" => Some(Quantity::Small),
            "M" => Some(Quantity::Medium),
            "L" => Some(Quantity::Large),
            _ => None,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(OrderItem, "orderItem", order_item_id);

fn validate_quantity(value: &str) -> Result<(), validator::ValidationError> {
    one_of("quantity", value, QUANTITIES)
}

/// One line of an order-items batch as submitted by the client
///
/// `order_id` is not read from the client; the lifecycle manager attaches
/// the identifier of the order it created for the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewOrderItem {
    #[serde(default, skip_deserializing)]
    #[validate(
        required(message = "order_id is required"),
        length(min = 1, message = "order_id is required")
    )]
    pub order_id: Option<String>,
    #[validate(
        required(message = "food_id is required"),
        length(min = 1, message = "food_id is required")
    )]
    pub food_id: Option<String>,
    #[validate(
        required(message = "quantity is required"),
        custom(function = "validate_quantity")
    )]
    pub quantity: Option<String>,
    #[validate(
        required(message = "unit_price is required"),
        range(min = 0.0, message = "unit_price must not be negative")
    )]
    pub unit_price: Option<f64>,
}

impl NewOrderItem {
    pub fn new(food_id: &str, quantity: &str, unit_price: f64) -> Self {
        Self {
            order_id: None,
            food_id: Some(food_id.to_string()),
            quantity: Some(quantity.to_string()),
            unit_price: Some(unit_price),
        }
    }

    /// Validate the line and build the record, rounding the unit price
    pub fn into_record(self, now: DateTime<Utc>) -> Result<OrderItem, ValidationError> {
        self.validate()?;
        let quantity = self
            .quantity
            .as_deref()
            .and_then(Quantity::parse)
            .ok_or_else(|| ValidationError::field("quantity", "quantity must be S, M or L"))?;

        Ok(OrderItem {
            order_item_id: new_id(),
            order_id: self.order_id.unwrap_or_default(),
            food_id: self.food_id.unwrap_or_default(),
            quantity,
            unit_price: round_price(self.unit_price.unwrap_or_default()),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderItemPatch {
    #[validate(range(min = 0.0, message = "unit_price must not be negative"))]
    pub unit_price: Option<f64>,
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: Option<String>,
    pub food_id: Option<String>,
}

impl FieldPatch for OrderItemPatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        self.validate()?;
        let mut updates = stamped(now);
        updates
            .set_if_some("unit_price", self.unit_price.map(round_price))
            .set_if_some("quantity", self.quantity)
            .set_if_some("food_id", self.food_id);
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    fn attached(mut item: NewOrderItem) -> NewOrderItem {
        item.order_id = Some("o1".into());
        item
    }

    #[test]
    fn test_into_record_rounds_half_away_from_zero() {
        let now = Utc::now();
        let item = attached(NewOrderItem::new("f1", "M", 10.005))
            .into_record(now)
            .unwrap();
        assert_eq!(item.unit_price, 10.01);
        assert_eq!(item.quantity, Quantity::Medium);
        assert_eq!(item.order_id, "o1");
    }

    #[test]
    fn test_quantity_outside_sizes_rejected() {
        let err = attached(NewOrderItem::new("f1", "XL", 1.0))
            .into_record(Utc::now())
            .unwrap_err();
        assert_eq!(err.first_field(), Some("quantity"));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut item = attached(NewOrderItem::new("f1", "S", 1.0));
        item.food_id = None;
        assert_eq!(
            item.into_record(Utc::now()).unwrap_err().first_field(),
            Some("food_id")
        );

        let item = NewOrderItem::new("f1", "S", 1.0);
        assert_eq!(
            item.into_record(Utc::now()).unwrap_err().first_field(),
            Some("order_id")
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = attached(NewOrderItem::new("f1", "S", -0.5))
            .into_record(Utc::now())
            .unwrap_err();
        assert_eq!(err.first_field(), Some("unit_price"));
    }

    #[test]
    fn test_client_order_id_is_ignored() {
        let item: NewOrderItem = serde_json::from_value(serde_json::json!({
            "order_id": "forged",
            "food_id": "f1",
            "quantity": "S",
            "unit_price": 2.0
        }))
        .unwrap();
        assert_eq!(item.order_id, None);
    }

    #[test]
    fn test_patch_validates_quantity() {
        let patch = OrderItemPatch {
            quantity: Some("XXL".into()),
            ..Default::default()
        };
        assert!(patch.into_updates(Utc::now()).is_err());

        let updates = OrderItemPatch {
            quantity: Some("L".into()),
            unit_price: Some(3.333),
            ..Default::default()
        }
        .into_updates(Utc::now())
        .unwrap();
        assert_eq!(updates.get("quantity"), Some(&FieldValue::from("L")));
        assert_eq!(updates.get("unit_price"), Some(&FieldValue::Float(3.33)));
    }
}
