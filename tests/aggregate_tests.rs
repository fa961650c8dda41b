//! Order aggregates built against an in-memory store

mod common;

use common::*;
use restaurant::prelude::*;

async fn dinner_batch(d: &Dinner) -> String {
    let created = OrderLifecycle::new(&d.stores)
        .create_batch(OrderBatch {
            table_id: Some(d.table.table_id.clone()),
            order_items: vec![
                NewOrderItem::new(&d.steak.food_id, "M", 10.01),
                NewOrderItem::new(&d.salad.food_id, "S", 5.00),
            ],
        })
        .await
        .unwrap();
    created.order.order_id
}

#[tokio::test]
async fn test_aggregate_of_two_items_at_one_table() {
    let d = dinner().await;
    let order_id = dinner_batch(&d).await;

    let aggregates = OrderAggregateBuilder::new(&d.stores)
        .build(&order_id)
        .await
        .unwrap();

    assert_eq!(aggregates.len(), 1);
    let aggregate = &aggregates[0];
    assert_eq!(aggregate.payment_due, 15.01);
    assert_eq!(aggregate.total_count, 2);
    assert_eq!(aggregate.table_number, Some(7));

    let names: Vec<Option<&str>> = aggregate
        .order_items
        .iter()
        .map(|line| line.food_name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("steak"), Some("salad")]);
    assert!(aggregate
        .order_items
        .iter()
        .all(|line| line.order_id.as_deref() == Some(order_id.as_str())));
    assert_eq!(aggregate.order_items[0].quantity, Quantity::Medium);
}

#[tokio::test]
async fn test_amounts_come_from_food_price() {
    let d = dinner().await;
    let created = OrderLifecycle::new(&d.stores)
        .create_batch(OrderBatch {
            table_id: Some(d.table.table_id.clone()),
            order_items: vec![NewOrderItem::new(&d.steak.food_id, "L", 99.0)],
        })
        .await
        .unwrap();

    let aggregate = OrderAggregateBuilder::new(&d.stores)
        .build_one(&created.order.order_id)
        .await
        .unwrap();

    assert_eq!(aggregate.order_items[0].amount, Some(10.01));
    assert_eq!(aggregate.order_items[0].price, Some(10.01));
    assert_eq!(aggregate.payment_due, 10.01);
}

#[tokio::test]
async fn test_rebuilding_yields_same_aggregate() {
    let d = dinner().await;
    let order_id = dinner_batch(&d).await;
    let builder = OrderAggregateBuilder::new(&d.stores);

    let first = builder.build(&order_id).await.unwrap();
    let second = builder.build(&order_id).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_order_without_items_has_no_aggregate() {
    let d = dinner().await;
    let order = OrderLifecycle::new(&d.stores)
        .create_batch(OrderBatch {
            table_id: Some(d.table.table_id.clone()),
            order_items: Vec::new(),
        })
        .await
        .unwrap()
        .order;

    let builder = OrderAggregateBuilder::new(&d.stores);
    assert!(builder.build(&order.order_id).await.unwrap().is_empty());
    assert!(builder.build(&new_id()).await.unwrap().is_empty());

    let err = builder.build_one(&order.order_id).await.unwrap_err();
    assert_eq!(err.error_code(), "RELATION_NOT_FOUND");
}

#[tokio::test]
async fn test_missing_food_counts_as_zero() {
    let d = dinner().await;
    let created = OrderLifecycle::new(&d.stores)
        .create_batch(OrderBatch {
            table_id: Some(d.table.table_id.clone()),
            order_items: vec![
                NewOrderItem::new(&d.steak.food_id, "M", 10.01),
                NewOrderItem::new("deleted-food", "M", 3.0),
            ],
        })
        .await
        .unwrap();

    let aggregate = OrderAggregateBuilder::new(&d.stores)
        .build_one(&created.order.order_id)
        .await
        .unwrap();

    assert_eq!(aggregate.total_count, 2);
    assert_eq!(aggregate.payment_due, 10.01);
    assert_eq!(aggregate.order_items[1].food_name, None);
    assert_eq!(aggregate.order_items[1].amount, None);
}

#[tokio::test]
async fn test_order_without_table_has_no_table_number() {
    let d = dinner().await;
    let created = OrderLifecycle::new(&d.stores)
        .create_batch(OrderBatch {
            table_id: None,
            order_items: vec![NewOrderItem::new(&d.salad.food_id, "S", 5.0)],
        })
        .await
        .unwrap();

    let aggregate = OrderAggregateBuilder::new(&d.stores)
        .build_one(&created.order.order_id)
        .await
        .unwrap();

    assert_eq!(aggregate.table_number, None);
    assert_eq!(aggregate.payment_due, 5.0);
}
