//! Invoice handlers

use crate::billing::InvoiceView;
use crate::core::error::RestaurantError;
use crate::entities::{Invoice, InvoicePatch, NewInvoice};
use crate::server::extract::JsonBody;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};

type ApiResult<T> = Result<Json<T>, RestaurantError>;

pub async fn list_invoices(State(state): State<AppState>) -> ApiResult<Vec<Invoice>> {
    state.invoices.list_invoices().await.map(Json)
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> ApiResult<InvoiceView> {
    state.invoices.view(&invoice_id).await.map(Json)
}

pub async fn create_invoice(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewInvoice>,
) -> ApiResult<Invoice> {
    state.invoices.create_invoice(payload).await.map(Json)
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    JsonBody(patch): JsonBody<InvoicePatch>,
) -> ApiResult<Invoice> {
    state.invoices.update_invoice(&invoice_id, patch).await.map(Json)
}
