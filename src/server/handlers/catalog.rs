//! Menu, food and table handlers

use crate::core::error::RestaurantError;
use crate::core::query::{FoodPage, PageParams};
use crate::entities::{Food, FoodPatch, Menu, MenuPatch, NewFood, NewMenu, NewTable, Table, TablePatch};
use crate::server::extract::JsonBody;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};

type ApiResult<T> = Result<Json<T>, RestaurantError>;

pub async fn list_menus(State(state): State<AppState>) -> ApiResult<Vec<Menu>> {
    state.catalog.list_menus().await.map(Json)
}

pub async fn get_menu(State(state): State<AppState>, Path(menu_id): Path<String>) -> ApiResult<Menu> {
    state.catalog.get_menu(&menu_id).await.map(Json)
}

pub async fn create_menu(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewMenu>,
) -> ApiResult<Menu> {
    state.catalog.create_menu(payload).await.map(Json)
}

pub async fn update_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    JsonBody(patch): JsonBody<MenuPatch>,
) -> ApiResult<Menu> {
    state.catalog.update_menu(&menu_id, patch).await.map(Json)
}

pub async fn list_foods(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<FoodPage<Food>> {
    state.catalog.list_foods(&params).await.map(Json)
}

pub async fn get_food(State(state): State<AppState>, Path(food_id): Path<String>) -> ApiResult<Food> {
    state.catalog.get_food(&food_id).await.map(Json)
}

pub async fn create_food(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewFood>,
) -> ApiResult<Food> {
    state.catalog.create_food(payload).await.map(Json)
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    JsonBody(patch): JsonBody<FoodPatch>,
) -> ApiResult<Food> {
    state.catalog.update_food(&food_id, patch).await.map(Json)
}

pub async fn list_tables(State(state): State<AppState>) -> ApiResult<Vec<Table>> {
    state.catalog.list_tables().await.map(Json)
}

pub async fn get_table(State(state): State<AppState>, Path(table_id): Path<String>) -> ApiResult<Table> {
    state.catalog.get_table(&table_id).await.map(Json)
}

pub async fn create_table(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewTable>,
) -> ApiResult<Table> {
    state.catalog.create_table(payload).await.map(Json)
}

pub async fn update_table(
    State(state): State<AppState>,
    Path(table_id): Path<String>,
    JsonBody(patch): JsonBody<TablePatch>,
) -> ApiResult<Table> {
    state.catalog.update_table(&table_id, patch).await.map(Json)
}
