//! HTTP handlers for the listings REST surface
//!
//! Handlers are thin: extract, call the service, wrap the result. Error
//! mapping lives on [`ListingError`].

use crate::core::error::ListingError;
use crate::core::filter::ListingQuery;
use crate::core::service::ListingsService;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{Value, json};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: ListingsService,
}

/// `GET /` — liveness text.
pub async fn liveness() -> &'static str {
    "Real Estate Listings API is running."
}

/// `GET /health` — health check endpoint handler.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "listings-rs"
    }))
}

/// `POST /api/listings`
pub async fn create_listing(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ListingError> {
    let created = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/listings`
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<Value>>, ListingError> {
    let listings = state.service.list(&query).await?;
    Ok(Json(listings))
}

/// `GET /api/listings/{id}`
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ListingError> {
    let listing = state.service.get(&id).await?;
    Ok(Json(listing))
}

/// `PUT /api/listings/{id}`
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ListingError> {
    let updated = state.service.update(&id, payload).await?;
    Ok(Json(updated))
}

/// `DELETE /api/listings/{id}`
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ListingError> {
    state.service.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
