//! HTTP server assembly
//!
//! Builds the axum router over any [`ListingStore`] and owns the fixed
//! runtime configuration (port, database coordinates). Routing, CORS and
//! request tracing live here; behavior lives in the service.

pub mod handlers;

use crate::core::service::ListingsService;
use crate::storage::ListingStore;
use axum::Router;
use axum::routing::get;
use handlers::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Fixed listen port (not externally configurable in this version).
pub const PORT: u16 = 4000;
/// Fixed MongoDB connection string.
pub const MONGO_URI: &str = "mongodb://127.0.0.1:27017";
/// Fixed database name.
pub const DB_NAME: &str = "realestate";

/// Build the application router over the given store.
pub fn build_router(store: Arc<dyn ListingStore>) -> Router {
    let state = AppState {
        service: ListingsService::new(store),
    };

    Router::new()
        .route("/", get(handlers::liveness))
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::health_check))
        .route(
            "/api/listings",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route(
            "/api/listings/{id}",
            get(handlers::get_listing)
                .put(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
