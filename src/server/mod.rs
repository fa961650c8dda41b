//! HTTP surface of the service
//!
//! This module provides a `ServerBuilder` that wires the stores into the
//! billing and catalog services and exposes them as a REST API:
//! - catalog routes (menus, foods, tables)
//! - order, order-item and invoice routes
//! - user reads and a public health check

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
