//! Order billing: aggregates, order lifecycle and invoices

pub mod aggregate;
pub mod invoice;
pub mod lifecycle;

pub use aggregate::{JoinLookups, LineItem, OrderAggregate, OrderAggregateBuilder, build_aggregates};
pub use invoice::{InvoiceService, InvoiceView, compose_view};
pub use lifecycle::{CreatedBatch, OrderBatch, OrderLifecycle};
