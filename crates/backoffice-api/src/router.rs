//! Route definitions for the back-office HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request logger.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(customer_routes())
        .merge(category_routes())
        .merge(product_routes())
        .merge(assignment_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and token verification
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/verify", get(handlers::auth::verify))
}

/// Customer CRUD, archiving, and billing snapshot
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(handlers::customer::list_customers).post(handlers::customer::create_customer),
        )
        .route(
            "/customers/archived/list",
            get(handlers::customer::list_archived),
        )
        .route(
            "/customers/{id}",
            get(handlers::customer::get_customer)
                .put(handlers::customer::update_customer)
                .delete(handlers::customer::archive_customer),
        )
        .route(
            "/customers/{id}/restore",
            put(handlers::customer::restore_customer),
        )
        .route(
            "/customers/{id}/billing",
            get(handlers::billing::get_billing),
        )
}

/// Category listing, tree, hierarchy, and archiving
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/products/categories/archived/list",
            get(handlers::category::list_archived),
        )
        .route(
            "/products/categories/tree",
            get(handlers::category::get_tree),
        )
        .route(
            "/products/categories/{id}",
            delete(handlers::category::archive_category),
        )
        .route(
            "/products/categories/{id}/parent",
            put(handlers::category::set_parent),
        )
        .route(
            "/products/categories/{id}/restore",
            put(handlers::category::restore_category),
        )
}

/// Catalog product CRUD
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(handlers::product::list_catalog).post(handlers::product::create_product),
        )
        .route("/products/all", get(handlers::product::list_all))
        .route(
            "/products/archived/list",
            get(handlers::product::list_archived),
        )
        .route(
            "/products/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::archive_product),
        )
        .route(
            "/products/{id}/toggle-active",
            put(handlers::product::toggle_active),
        )
        .route(
            "/products/{id}/restore",
            put(handlers::product::restore_product),
        )
        .route(
            "/products/{id}/permanent",
            delete(handlers::product::delete_permanently),
        )
}

/// Assignment engine and export
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/customer-products", post(handlers::assignment::attach))
        .route(
            "/customer-products/custom",
            post(handlers::assignment::attach_custom),
        )
        .route(
            "/customer-products/bulk-update",
            put(handlers::assignment::bulk_update),
        )
        .route(
            "/customer-products/customer/{id}",
            get(handlers::assignment::list_for_customer),
        )
        .route(
            "/customer-products/customer/{id}/summary",
            get(handlers::assignment::summary),
        )
        .route(
            "/customer-products/export/excel/{customer_id}",
            get(handlers::export::export_excel),
        )
        .route(
            "/customer-products/{id}",
            put(handlers::assignment::set_quantity).delete(handlers::assignment::remove),
        )
        .route(
            "/customer-products/{id}/increase",
            put(handlers::assignment::increase),
        )
        .route(
            "/customer-products/{id}/decrease",
            put(handlers::assignment::decrease),
        )
        .route(
            "/customer-products/{id}/toggle-billed",
            put(handlers::assignment::toggle_billed),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
