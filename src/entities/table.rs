use super::{FieldPatch, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: String,
    pub number_of_guests: i64,
    pub table_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Table, "table", table_id);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewTable {
    #[validate(required(message = "number_of_guests is required"))]
    pub number_of_guests: Option<i64>,
    #[validate(required(message = "table_number is required"))]
    pub table_number: Option<i64>,
}

impl NewTable {
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Table, ValidationError> {
        self.validate()?;
        Ok(Table {
            table_id: new_id(),
            number_of_guests: self.number_of_guests.unwrap_or_default(),
            table_number: self.table_number.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablePatch {
    pub number_of_guests: Option<i64>,
    pub table_number: Option<i64>,
}

impl FieldPatch for TablePatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        let mut updates = stamped(now);
        updates
            .set_if_some("number_of_guests", self.number_of_guests)
            .set_if_some("table_number", self.table_number);
        Ok(updates)
    }
}
