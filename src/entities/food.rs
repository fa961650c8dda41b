use super::{FieldPatch, stamped};
use crate::core::entity::new_id;
use crate::core::error::ValidationError;
use crate::core::field::FieldUpdates;
use crate::core::money::round_price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub food_id: String,
    pub name: String,
    pub price: f64,
    pub food_image: String,
    pub menu_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Food, "food", food_id);

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewFood {
    #[validate(
        required(message = "name is required"),
        length(min = 2, max = 100, message = "name must be 2 to 100 characters")
    )]
    pub name: Option<String>,
    #[validate(required(message = "price is required"))]
    pub price: Option<f64>,
    #[validate(required(message = "food_image is required"))]
    pub food_image: Option<String>,
    #[validate(required(message = "menu_id is required"))]
    pub menu_id: Option<String>,
}

impl NewFood {
    /// Validate the payload and build the record, rounding the price
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Food, ValidationError> {
        self.validate()?;
        Ok(Food {
            food_id: new_id(),
            name: self.name.unwrap_or_default(),
            price: round_price(self.price.unwrap_or_default()),
            food_image: self.food_image.unwrap_or_default(),
            menu_id: self.menu_id.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FoodPatch {
    #[validate(length(min = 2, max = 100, message = "name must be 2 to 100 characters"))]
    pub name: Option<String>,
    pub price: Option<f64>,
    pub food_image: Option<String>,
    pub menu_id: Option<String>,
}

impl FieldPatch for FoodPatch {
    fn into_updates(self, now: DateTime<Utc>) -> Result<FieldUpdates, ValidationError> {
        self.validate()?;
        let mut updates = stamped(now);
        updates
            .set_if_some("name", self.name)
            .set_if_some("price", self.price.map(round_price))
            .set_if_some("food_image", self.food_image)
            .set_if_some("menu_id", self.menu_id);
        Ok(updates)
    }
}
