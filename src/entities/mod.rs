//! Persisted records of the restaurant domain
//!
//! Each record comes with a create payload (validated, turned into the
//! record with fresh identifier and timestamps) and, where the record is
//! mutable, a patch whose present fields become a [`FieldUpdates`].

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

pub use food::{Food, FoodPatch, NewFood};
pub use invoice::{Invoice, InvoicePatch, NewInvoice, PaymentMethod, PaymentStatus};
pub use menu::{Menu, MenuPatch, NewMenu};
pub use order::{NewOrder, Order, OrderPatch};
pub use order_item::{NewOrderItem, OrderItem, OrderItemPatch, Quantity};
pub use table::{NewTable, Table, TablePatch};
pub use user::{User, UserView};

use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use chrono::{DateTime, Utc};

/// A partial update of a stored record
///
/// Only the fields present in the patch are written. Every non-failing
/// conversion also stamps `updated_at`.
pub trait FieldPatch: Send {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError>;
}

/// Start an update list carrying the modification timestamp
pub(crate) fn stamped(now: DateTime<Utc>) -> FieldUpdates {
    let mut updates = FieldUpdates::new();
    updates.set("updated_at", now);
    updates
}

/// Shared check for enumerated string fields
pub(crate) fn one_of(
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<(), validator::ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("one_of");
        err.message = Some(format!("{} must be one of {:?}", field, allowed).into());
        Err(err)
    }
}
