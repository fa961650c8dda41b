use super::{FieldPatch, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub menu_id: String,
    pub name: String,
    pub category: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Menu, "menu", menu_id);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewMenu {
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category is required")
    )]
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl NewMenu {
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Menu, ValidationError> {
        self.validate()?;
        Ok(Menu {
            menu_id: new_id(),
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// A menu window is valid when it opens in the future and closes after it opens
pub fn valid_window(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start > now && end > start
}

impl FieldPatch for MenuPatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        let mut updates = stamped(now);

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if !valid_window(start, end, now) {
                return Err(ValidationError::field(
                    "start_date",
                    "the menu must start in the future and end after it starts",
                ));
            }
            updates.set("start_date", start).set("end_date", end);
        }

        updates
            .set_if_some("name", self.name.filter(|n| !n.is_empty()))
            .set_if_some("category", self.category.filter(|c| !c.is_empty()));

        Ok(updates)
    }
}
