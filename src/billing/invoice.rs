//! Invoices and the invoice view
//!
//! The view is the stored invoice merged with the aggregate of its order:
//! amount due, table number and order lines come from the aggregate, the
//! payment fields from the invoice.

use super::aggregate::{LineItem, OrderAggregate, OrderAggregateBuilder};
use crate::core::DocumentStore;
use crate::core::error::RestaurantResult;
use crate::entities::{Invoice, InvoicePatch, NewInvoice, Order, PaymentStatus};
use crate::services::{apply_patch, fetch, insert, list_all, require_relation};
use crate::storage::Stores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Placeholder shown when an invoice has no payment method
pub const NO_PAYMENT_METHOD: &str = "null";

/// Body of `GET /invoices/{invoice_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub payment_method: String,
    pub order_id: String,
    pub payment_status: PaymentStatus,
    pub payment_due: f64,
    pub table_number: Option<i64>,
    pub payment_due_date: DateTime<Utc>,
    pub order_details: Vec<LineItem>,
}

/// Merge a stored invoice with the aggregate of its order
pub fn compose_view(invoice: &Invoice, aggregate: OrderAggregate) -> InvoiceView {
    InvoiceView {
        invoice_id: invoice.invoice_id.clone(),
        payment_method: invoice
            .payment_method
            .map(|method| method.as_str().to_string())
            .unwrap_or_else(|| NO_PAYMENT_METHOD.to_string()),
        order_id: invoice.order_id.clone(),
        payment_status: invoice.payment_status,
        payment_due: aggregate.payment_due,
        table_number: aggregate.table_number,
        payment_due_date: invoice.payment_due_date,
        order_details: aggregate.order_items,
    }
}

#[derive(Clone)]
pub struct InvoiceService {
    invoices: Arc<dyn DocumentStore<Invoice>>,
    orders: Arc<dyn DocumentStore<Order>>,
    aggregates: OrderAggregateBuilder,
}

impl InvoiceService {
    pub fn new(stores: &Stores, aggregates: OrderAggregateBuilder) -> Self {
        Self {
            invoices: stores.invoices.clone(),
            orders: stores.orders.clone(),
            aggregates,
        }
    }

    pub async fn list_invoices(&self) -> RestaurantResult<Vec<Invoice>> {
        list_all(self.invoices.as_ref()).await
    }

    /// Compose the view of a stored invoice
    ///
    /// Fails with a missing-relation error when the invoice's order has no
    /// items to bill.
    pub async fn view(&self, invoice_id: &str) -> RestaurantResult<InvoiceView> {
        let invoice = fetch(self.invoices.as_ref(), invoice_id).await?;
        let aggregate = self.aggregates.build_one(&invoice.order_id).await?;
        Ok(compose_view(&invoice, aggregate))
    }

    /// Create an invoice for an existing order
    pub async fn create_invoice(&self, payload: NewInvoice) -> RestaurantResult<Invoice> {
        let invoice = payload.into_record(Utc::now())?;
        require_relation(self.orders.as_ref(), &invoice.order_id).await?;
        let invoice = insert(self.invoices.as_ref(), invoice).await?;

        tracing::info!(
            invoice_id = %invoice.invoice_id,
            order_id = %invoice.order_id,
            "invoice issued"
        );
        Ok(invoice)
    }

    pub async fn update_invoice(
        &self,
        invoice_id: &str,
        patch: InvoicePatch,
    ) -> RestaurantResult<Invoice> {
        apply_patch(self.invoices.as_ref(), invoice_id, patch).await
    }
}
