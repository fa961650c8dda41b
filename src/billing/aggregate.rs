//! Order aggregate builder
//!
//! Reconstructs the billing picture of an order from its items: every item
//! is left-joined to its food, its order and that order's table, projected
//! to a flat line and grouped by `(order_id, table_id, table_number)`.
//! Aggregates are derived on every read and never stored.
//!
//! The join itself is [`build_aggregates`], a pure function over the items
//! and lookup maps; [`OrderAggregateBuilder`] only fetches its inputs.

use crate::core::error::{EntityError, RestaurantResult, StoreResultExt};
use crate::core::money::sum_amounts;
use crate::core::{DocumentStore, Entity, Filter};
use crate::entities::{Food, Order, OrderItem, Quantity, Table};
use crate::storage::Stores;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// One projected order item
///
/// Joined fields are `None` when the referenced record does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Price of the joined food
    pub amount: Option<f64>,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    pub table_number: Option<i64>,
    pub table_id: Option<String>,
    pub order_id: Option<String>,
    /// Same value as `amount`
    pub price: Option<f64>,
    pub quantity: Quantity,
}

/// Billing picture of one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAggregate {
    /// Sum of the line amounts, missing amounts counted as zero
    pub payment_due: f64,
    pub total_count: usize,
    pub table_number: Option<i64>,
    pub order_items: Vec<LineItem>,
}

/// Records the order items are joined against, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct JoinLookups {
    foods: HashMap<String, Food>,
    orders: HashMap<String, Order>,
    tables: HashMap<String, Table>,
}

fn index_by_id<T: Entity>(records: impl IntoIterator<Item = T>) -> HashMap<String, T> {
    let mut index = HashMap::new();
    for record in records {
        // first record wins when identifiers collide
        index.entry(record.id().to_string()).or_insert(record);
    }
    index
}

impl JoinLookups {
    pub fn new(
        foods: impl IntoIterator<Item = Food>,
        orders: impl IntoIterator<Item = Order>,
        tables: impl IntoIterator<Item = Table>,
    ) -> Self {
        Self {
            foods: index_by_id(foods),
            orders: index_by_id(orders),
            tables: index_by_id(tables),
        }
    }

    fn project(&self, item: &OrderItem) -> LineItem {
        let food = self.foods.get(&item.food_id);
        let order = self.orders.get(&item.order_id);
        let table = order
            .and_then(|o| o.table_id.as_ref())
            .and_then(|table_id| self.tables.get(table_id));

        let amount = food.map(|f| f.price);
        LineItem {
            amount,
            food_name: food.map(|f| f.name.clone()),
            food_image: food.map(|f| f.food_image.clone()),
            table_number: table.map(|t| t.table_number),
            table_id: table.map(|t| t.table_id.clone()),
            order_id: order.map(|o| o.order_id.clone()),
            price: amount,
            quantity: item.quantity,
        }
    }
}

type GroupKey = (Option<String>, Option<String>, Option<i64>);

/// Join, project and group the items of `order_id`
///
/// Returns one aggregate per `(order_id, table_id, table_number)` group,
/// ordered by that key. Items keep their input order inside a group. No
/// matching items yields an empty result.
pub fn build_aggregates(
    order_id: &str,
    items: &[OrderItem],
    lookups: &JoinLookups,
) -> Vec<OrderAggregate> {
    let mut groups: BTreeMap<GroupKey, Vec<LineItem>> = BTreeMap::new();

    for item in items.iter().filter(|item| item.order_id == order_id) {
        let line = lookups.project(item);
        let key = (line.order_id.clone(), line.table_id.clone(), line.table_number);
        groups.entry(key).or_default().push(line);
    }

    groups
        .into_iter()
        .map(|((_, _, table_number), lines)| OrderAggregate {
            payment_due: sum_amounts(lines.iter().map(|line| line.amount)),
            total_count: lines.len(),
            table_number,
            order_items: lines,
        })
        .collect()
}

/// Store-backed aggregate builder
#[derive(Clone)]
pub struct OrderAggregateBuilder {
    order_items: Arc<dyn DocumentStore<OrderItem>>,
    foods: Arc<dyn DocumentStore<Food>>,
    orders: Arc<dyn DocumentStore<Order>>,
    tables: Arc<dyn DocumentStore<Table>>,
}

impl OrderAggregateBuilder {
    pub fn new(stores: &Stores) -> Self {
        Self {
            order_items: stores.order_items.clone(),
            foods: stores.foods.clone(),
            orders: stores.orders.clone(),
            tables: stores.tables.clone(),
        }
    }

    /// Build the aggregates of an order
    ///
    /// An order without items (including one left behind by a rejected
    /// batch) yields an empty list, not an error.
    pub async fn build(&self, order_id: &str) -> RestaurantResult<Vec<OrderAggregate>> {
        let items = self
            .order_items
            .find(&Filter::eq("order_id", order_id))
            .await
            .in_store(OrderItem::resource_name(), "find")?;

        if items.is_empty() {
            tracing::debug!(order_id, "order has no items");
            return Ok(Vec::new());
        }

        let food_ids: BTreeSet<&str> = items.iter().map(|i| i.food_id.as_str()).collect();
        let foods = self
            .foods
            .find(&Filter::any_of("food_id", food_ids))
            .await
            .in_store(Food::resource_name(), "find")?;

        let orders = self
            .orders
            .find(&Filter::eq("order_id", order_id))
            .await
            .in_store(Order::resource_name(), "find")?;

        let table_ids: BTreeSet<&str> = orders
            .iter()
            .filter_map(|o| o.table_id.as_deref())
            .collect();
        let tables = if table_ids.is_empty() {
            Vec::new()
        } else {
            self.tables
                .find(&Filter::any_of("table_id", table_ids))
                .await
                .in_store(Table::resource_name(), "find")?
        };

        let lookups = JoinLookups::new(foods, orders, tables);
        let aggregates = build_aggregates(order_id, &items, &lookups);

        if aggregates.len() > 1 {
            tracing::warn!(
                order_id,
                groups = aggregates.len(),
                "order items split over several groups"
            );
        }

        Ok(aggregates)
    }

    /// Build the single aggregate of an order
    ///
    /// Fails with a missing-relation error when the order has no items. When
    /// malformed data produces several groups the first one in key order is
    /// returned.
    pub async fn build_one(&self, order_id: &str) -> RestaurantResult<OrderAggregate> {
        self.build(order_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EntityError::missing_relation("order items of order", order_id).into())
    }
}
