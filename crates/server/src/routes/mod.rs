//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the database)
//!
//! # Discovery (public)
//! GET  /api/business/nearby    - Merchants within a radius, by distance
//! GET  /api/products/nearby    - Products sold by nearby merchants
//!
//! # Dashboard (requires auth)
//! GET  /api/clients            - Client list with dues summaries
//! POST /api/clients            - Upsert a client by phone
//! GET  /api/products           - Product catalog list
//! POST /api/products           - Create a product (+ initial stock log)
//! GET  /api/invoices           - Invoice list
//!
//! # Auth
//! POST /api/auth/login         - Email/password login
//! POST /api/auth/logout        - Clear the session
//! ```

pub mod auth;
pub mod clients;
pub mod invoices;
pub mod nearby;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/business/nearby", get(nearby::nearby_merchants))
        .route("/api/products/nearby", get(nearby::nearby_products))
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::upsert_client),
        )
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/invoices", get(invoices::list_invoices))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
}
