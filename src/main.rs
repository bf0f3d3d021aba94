//! Listings API server
//!
//! Connects to MongoDB and serves the REST surface on the fixed port.

use anyhow::{Context, Result};
use listings::server::{DB_NAME, MONGO_URI, PORT, build_router};
use listings::storage::MongoListingStore;
use mongodb::Client;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = Client::with_uri_str(MONGO_URI)
        .await
        .context("Failed to connect to MongoDB")?;
    let database = client.database(DB_NAME);
    info!(uri = MONGO_URI, db = DB_NAME, "connected to MongoDB");

    let store = Arc::new(MongoListingStore::new(database));
    let app = build_router(store);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", PORT))
        .await
        .with_context(|| format!("Failed to bind port {PORT}"))?;
    info!("server running on http://0.0.0.0:{PORT}");

    axum::serve(listener, app).await.context("Server exited")?;

    Ok(())
}
