//! Route table

use super::handlers::{catalog, health_check, invoices, orders, users};
use super::middleware::{enforce_deadline, require_token};
use super::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// - `GET /health` is public
/// - every resource route requires a token accepted by the auth provider
/// - every request, public or not, runs under the request deadline
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route("/menus", get(catalog::list_menus).post(catalog::create_menu))
        .route(
            "/menus/{menu_id}",
            get(catalog::get_menu).patch(catalog::update_menu),
        )
        .route("/foods", get(catalog::list_foods).post(catalog::create_food))
        .route(
            "/foods/{food_id}",
            get(catalog::get_food).patch(catalog::update_food),
        )
        .route("/tables", get(catalog::list_tables).post(catalog::create_table))
        .route(
            "/tables/{table_id}",
            get(catalog::get_table).patch(catalog::update_table),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{order_id}",
            get(orders::get_order).patch(orders::update_order),
        )
        .route(
            "/orderItems",
            get(orders::list_order_items).post(orders::create_order_items),
        )
        .route(
            "/orderItems/{order_item_id}",
            get(orders::get_order_item).patch(orders::update_order_item),
        )
        .route(
            "/orderItems-order/{order_id}",
            get(orders::order_items_by_order),
        )
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/invoices/{invoice_id}",
            get(invoices::get_invoice).patch(invoices::update_invoice),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), enforce_deadline)),
        )
        .with_state(state)
}
