use axum::{routing::get, Router};
use contracts::domain::a001_order::feed::{ORDERS_PATH, SEARCH_PATH};

use crate::handlers;

/// All routes of the order feed service
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(ORDERS_PATH, get(handlers::a001_order::list_all))
        .route(SEARCH_PATH, get(handlers::a001_order::search))
}
