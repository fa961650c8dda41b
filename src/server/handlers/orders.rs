//! Order and order-item handlers

use crate::billing::{OrderAggregate, OrderBatch};
use crate::core::error::RestaurantError;
use crate::entities::{NewOrder, Order, OrderItem, OrderItemPatch, OrderPatch};
use crate::server::extract::JsonBody;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};

type ApiResult<T> = Result<Json<T>, RestaurantError>;

pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    state.lifecycle.list_orders().await.map(Json)
}

pub async fn get_order(State(state): State<AppState>, Path(order_id): Path<String>) -> ApiResult<Order> {
    state.lifecycle.get_order(&order_id).await.map(Json)
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewOrder>,
) -> ApiResult<Order> {
    state.lifecycle.create_order(payload).await.map(Json)
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    JsonBody(patch): JsonBody<OrderPatch>,
) -> ApiResult<Order> {
    state.lifecycle.update_order(&order_id, patch).await.map(Json)
}

pub async fn list_order_items(State(state): State<AppState>) -> ApiResult<Vec<OrderItem>> {
    state.lifecycle.list_order_items().await.map(Json)
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
) -> ApiResult<OrderItem> {
    state.lifecycle.get_order_item(&order_item_id).await.map(Json)
}

/// `POST /orderItems`: open an order and insert the submitted items
pub async fn create_order_items(
    State(state): State<AppState>,
    JsonBody(batch): JsonBody<OrderBatch>,
) -> ApiResult<Vec<OrderItem>> {
    let created = state.lifecycle.create_batch(batch).await?;
    Ok(Json(created.items))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(order_item_id): Path<String>,
    JsonBody(patch): JsonBody<OrderItemPatch>,
) -> ApiResult<OrderItem> {
    state
        .lifecycle
        .update_order_item(&order_item_id, patch)
        .await
        .map(Json)
}

/// `GET /orderItems-order/{order_id}`: zero or one aggregate
pub async fn order_items_by_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Vec<OrderAggregate>> {
    state.aggregates.build(&order_id).await.map(Json)
}
