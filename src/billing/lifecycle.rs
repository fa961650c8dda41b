//! Order and order-item lifecycle
//!
//! A batch of order items always opens a new order. The order is written
//! first and the items follow in a single bulk insert. The two writes are
//! not transactional: when an item is rejected, the order stays behind
//! with no items, and readers see it as an order with an empty aggregate.

use crate::core::error::{RestaurantResult, StoreResultExt};
use crate::core::{DocumentStore, Entity};
use crate::entities::{NewOrder, NewOrderItem, Order, OrderItem, OrderItemPatch, OrderPatch, Table};
use crate::services::{apply_patch, fetch, insert, list_all, require_relation};
use crate::storage::Stores;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /orderItems`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderBatch {
    /// Table of the new order; not checked against the tables collection
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_items: Vec<NewOrderItem>,
}

/// Outcome of a successful batch
#[derive(Debug, Clone)]
pub struct CreatedBatch {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Clone)]
pub struct OrderLifecycle {
    orders: Arc<dyn DocumentStore<Order>>,
    order_items: Arc<dyn DocumentStore<OrderItem>>,
    tables: Arc<dyn DocumentStore<Table>>,
}

impl OrderLifecycle {
    pub fn new(stores: &Stores) -> Self {
        Self {
            orders: stores.orders.clone(),
            order_items: stores.order_items.clone(),
            tables: stores.tables.clone(),
        }
    }

    /// Open an order and insert its items
    ///
    /// Items are validated in submission order. The first invalid item
    /// rejects the whole batch with its index and field; no item is
    /// written, but the order created for the batch remains.
    pub async fn create_batch(&self, batch: OrderBatch) -> RestaurantResult<CreatedBatch> {
        let order = Order::open(batch.table_id, Utc::now());
        let order = self
            .orders
            .insert(order)
            .await
            .in_store(Order::resource_name(), "insert")?;
        let order_id = order.order_id.clone();

        let mut items = Vec::with_capacity(batch.order_items.len());
        for (index, mut payload) in batch.order_items.into_iter().enumerate() {
            payload.order_id = Some(order_id.clone());
            match payload.into_record(Utc::now()) {
                Ok(item) => items.push(item),
                Err(err) => {
                    let err = err.in_batch(index);
                    tracing::warn!(
                        order_id = %order_id,
                        index,
                        error = %err,
                        "order item rejected, order kept without items"
                    );
                    return Err(err.into());
                }
            }
        }

        let items = if items.is_empty() {
            items
        } else {
            self.order_items
                .insert_many(items)
                .await
                .in_store(OrderItem::resource_name(), "insert_many")?
        };

        tracing::info!(order_id = %order_id, item_count = items.len(), "order batch created");
        Ok(CreatedBatch { order, items })
    }

    // === Orders ===

    pub async fn list_orders(&self) -> RestaurantResult<Vec<Order>> {
        list_all(self.orders.as_ref()).await
    }

    pub async fn get_order(&self, order_id: &str) -> RestaurantResult<Order> {
        fetch(self.orders.as_ref(), order_id).await
    }

    /// Create a standalone order; unlike a batch it must name an existing table
    pub async fn create_order(&self, payload: NewOrder) -> RestaurantResult<Order> {
        let order = payload.into_record(Utc::now())?;
        if let Some(table_id) = order.table_id.as_deref() {
            require_relation(self.tables.as_ref(), table_id).await?;
        }
        insert(self.orders.as_ref(), order).await
    }

    pub async fn update_order(&self, order_id: &str, patch: OrderPatch) -> RestaurantResult<Order> {
        if let Some(table_id) = patch.table_id.as_deref() {
            require_relation(self.tables.as_ref(), table_id).await?;
        }
        apply_patch(self.orders.as_ref(), order_id, patch).await
    }

    // === Order items ===

    pub async fn list_order_items(&self) -> RestaurantResult<Vec<OrderItem>> {
        list_all(self.order_items.as_ref()).await
    }

    pub async fn get_order_item(&self, order_item_id: &str) -> RestaurantResult<OrderItem> {
        fetch(self.order_items.as_ref(), order_item_id).await
    }

    pub async fn update_order_item(
        &self,
        order_item_id: &str,
        patch: OrderItemPatch,
    ) -> RestaurantResult<OrderItem> {
        apply_patch(self.order_items.as_ref(), order_item_id, patch).await
    }
}
