//! Route handlers for the portal web service.

pub mod health;
pub mod init_db;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/init-db", get(init_db::init_db))
        .layer(TraceLayer::new_for_http())
}
