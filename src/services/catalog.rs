//! Menus, foods and tables

use super::{apply_patch, fetch, insert, list_all, require_relation};
use crate::core::error::{RestaurantResult, StoreResultExt};
use crate::core::query::{FoodPage, PageParams};
use crate::core::{DocumentStore, Entity, Filter};
use crate::entities::{Food, FoodPatch, Menu, MenuPatch, NewFood, NewMenu, NewTable, Table, TablePatch};
use crate::storage::Stores;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    menus: Arc<dyn DocumentStore<Menu>>,
    foods: Arc<dyn DocumentStore<Food>>,
    tables: Arc<dyn DocumentStore<Table>>,
}

impl CatalogService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            menus: stores.menus.clone(),
            foods: stores.foods.clone(),
            tables: stores.tables.clone(),
        }
    }

    // === Menus ===

    pub async fn list_menus(&self) -> RestaurantResult<Vec<Menu>> {
        list_all(self.menus.as_ref()).await
    }

    pub async fn get_menu(&self, menu_id: &str) -> RestaurantResult<Menu> {
        fetch(self.menus.as_ref(), menu_id).await
    }

    pub async fn create_menu(&self, payload: NewMenu) -> RestaurantResult<Menu> {
        let menu = payload.into_record(Utc::now())?;
        insert(self.menus.as_ref(), menu).await
    }

    pub async fn update_menu(&self, menu_id: &str, patch: MenuPatch) -> RestaurantResult<Menu> {
        apply_patch(self.menus.as_ref(), menu_id, patch).await
    }

    // === Foods ===

    /// One page of the food catalogue plus the size of the whole catalogue
    pub async fn list_foods(&self, params: &PageParams) -> RestaurantResult<FoodPage<Food>> {
        let total_count = self
            .foods
            .count(&Filter::All)
            .await
            .in_store(Food::resource_name(), "count")?;
        let foods = list_all(self.foods.as_ref()).await?;

        Ok(FoodPage {
            total_count: total_count as usize,
            food_items: params.window().slice(foods),
        })
    }

    pub async fn get_food(&self, food_id: &str) -> RestaurantResult<Food> {
        fetch(self.foods.as_ref(), food_id).await
    }

    /// Create a food under an existing menu; the price is stored rounded
    pub async fn create_food(&self, payload: NewFood) -> RestaurantResult<Food> {
        let food = payload.into_record(Utc::now())?;
        require_relation(self.menus.as_ref(), &food.menu_id).await?;
        insert(self.foods.as_ref(), food).await
    }

    pub async fn update_food(&self, food_id: &str, patch: FoodPatch) -> RestaurantResult<Food> {
        if let Some(menu_id) = patch.menu_id.as_deref() {
            require_relation(self.menus.as_ref(), menu_id).await?;
        }
        apply_patch(self.foods.as_ref(), food_id, patch).await
    }

    // === Tables ===

    pub async fn list_tables(&self) -> RestaurantResult<Vec<Table>> {
        list_all(self.tables.as_ref()).await
    }

    pub async fn get_table(&self, table_id: &str) -> RestaurantResult<Table> {
        fetch(self.tables.as_ref(), table_id).await
    }

    pub async fn create_table(&self, payload: NewTable) -> RestaurantResult<Table> {
        let table = payload.into_record(Utc::now())?;
        insert(self.tables.as_ref(), table).await
    }

    pub async fn update_table(&self, table_id: &str, patch: TablePatch) -> RestaurantResult<Table> {
        apply_patch(self.tables.as_ref(), table_id, patch).await
    }
}
