//! HTTP route handlers for the explorer.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Explorer page (initial load)
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (catalog reachable)
//!
//! # Explorer (HTMX fragments)
//! GET  /explorer/products           - Reload current page (results fragment)
//! POST /explorer/variant            - Select query variant, back to page 1
//! POST /explorer/search             - Debounced name search, back to page 1
//! POST /explorer/page/previous      - Previous page (204 on the first page)
//! POST /explorer/page/next          - Next page
//!
//! # Data generation (HTMX fragments)
//! POST /explorer/generate/fixed     - Generate 50,000 products
//! POST /explorer/generate/custom    - Generate a custom volume
//! ```

pub mod explorer;
pub mod generation;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the explorer fragment routes router.
pub fn explorer_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(explorer::products))
        .route("/variant", post(explorer::select_variant))
        .route("/search", post(explorer::search))
        .route("/page/previous", post(explorer::previous_page))
        .route("/page/next", post(explorer::next_page))
        .route("/generate/fixed", post(generation::fixed))
        .route("/generate/custom", post(generation::custom))
}

/// Create all routes for the explorer.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(explorer::index))
        .nest("/explorer", explorer_routes())
}
