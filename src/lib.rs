//! # restaurant-rs
//!
//! Back-office REST service for a restaurant: menus, foods, tables, orders,
//! order items and invoices over a document store.
//!
//! ## Features
//!
//! - **Order aggregates**: order items joined with foods, orders and tables,
//!   grouped per order with the amount due, rebuilt on every read
//! - **Order batches**: one request opens an order and inserts its items,
//!   with validated sizes and prices rounded to two decimals
//! - **Invoice views**: stored invoices merged with their order's aggregate
//! - **Pluggable storage**: in-memory (default) or MongoDB (`mongodb_backend`)
//! - **Token auth seam**: static tokens or any custom [`core::AuthProvider`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restaurant::prelude::*;
//!
//! let stores = Stores::in_memory();
//! let lifecycle = OrderLifecycle::new(&stores);
//! let created = lifecycle
//!     .create_batch(OrderBatch {
//!         table_id: Some(table_id),
//!         order_items: vec![NewOrderItem::new(&food_id, "M", 10.005)],
//!     })
//!     .await?;
//!
//! let aggregates = OrderAggregateBuilder::new(&stores)
//!     .build(&created.order.order_id)
//!     .await?;
//! ```

pub mod billing;
pub mod config;
pub mod core;
pub mod entities;
pub mod logging;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AuthContext, AuthProvider, DocumentStore, Entity, FieldUpdates, FieldValue, Filter,
        NoAuthProvider, PageParams, RestaurantError, RestaurantResult, StaticTokenProvider,
        new_id, round_price,
    };

    // === Records ===
    pub use crate::entities::{
        FieldPatch, Food, FoodPatch, Invoice, InvoicePatch, Menu, MenuPatch, NewFood, NewInvoice,
        NewMenu, NewOrder, NewOrderItem, NewTable, Order, OrderItem, OrderItemPatch, OrderPatch,
        PaymentMethod, PaymentStatus, Quantity, Table, TablePatch, User, UserView,
    };

    // === Billing ===
    pub use crate::billing::{
        InvoiceService, InvoiceView, LineItem, OrderAggregate, OrderAggregateBuilder, OrderBatch,
        OrderLifecycle,
    };

    // === Services & storage ===
    pub use crate::services::{CatalogService, UserService};
    pub use crate::storage::{InMemoryStore, Stores};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config & server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{AppState, ServerBuilder, build_router};
}
