//! HTTP handlers, one module per resource

pub mod catalog;
pub mod invoices;
pub mod orders;
pub mod users;

use axum::Json;
use serde_json::{Value, json};

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "restaurant-rs"
    }))
}
