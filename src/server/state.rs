//! Shared handler state

use crate::billing::{InvoiceService, OrderAggregateBuilder, OrderLifecycle};
use crate::core::AuthProvider;
use crate::services::{CatalogService, UserService};
use crate::storage::Stores;
use std::sync::Arc;
use std::time::Duration;

/// Everything the handlers need, built once from the store bundle
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub users: UserService,
    pub lifecycle: OrderLifecycle,
    pub aggregates: OrderAggregateBuilder,
    pub invoices: InvoiceService,
    pub auth: Arc<dyn AuthProvider>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(stores: &Stores, auth: Arc<dyn AuthProvider>, request_timeout: Duration) -> Self {
        let aggregates = OrderAggregateBuilder::new(stores);
        Self {
            catalog: CatalogService::new(stores),
            users: UserService::new(stores),
            lifecycle: OrderLifecycle::new(stores),
            invoices: InvoiceService::new(stores, aggregates.clone()),
            aggregates,
            auth,
            request_timeout,
        }
    }
}
