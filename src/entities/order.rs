use super::{FieldPatch, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub order_date: DateTime<Utc>,
    /// Table the order is served at; may stay unset for batch-created orders
    pub table_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Order, "order", order_id);

impl Order {
    /// A fresh order dated `now`
    pub fn open(table_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            order_id: new_id(),
            order_date: now,
            table_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewOrder {
    pub order_date: Option<DateTime<Utc>>,
    #[validate(
        required(message = "table_id is required"),
        length(min = 1, message = "table_id is required")
    )]
    pub table_id: Option<String>,
}

impl NewOrder {
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Order, ValidationError> {
        self.validate()?;
        let mut order = Order::open(self.table_id, now);
        if let Some(date) = self.order_date {
            order.order_date = date;
        }
        Ok(order)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
    pub table_id: Option<String>,
}

impl FieldPatch for OrderPatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        let mut updates = stamped(now);
        updates.set_if_some("table_id", self.table_id);
        Ok(updates)
    }
}
