//! Read-only listing detail viewer
//!
//! Fetches a listing once. Any failure collapses into the generic
//! not-found error — the viewer has no richer error surface.

use super::api::ListingsClient;
use super::error::ClientError;
use crate::core::listing::Listing;
use tracing::warn;

/// Viewer for a single listing's details.
pub struct ListingViewer {
    client: ListingsClient,
}

impl ListingViewer {
    pub fn new(client: ListingsClient) -> Self {
        Self { client }
    }

    /// Fetch the listing to render.
    pub async fn load(&self, id: &str) -> Result<Listing, ClientError> {
        match self.client.get(id).await {
            Ok(listing) => Ok(listing),
            Err(ClientError::NotFound) => Err(ClientError::NotFound),
            Err(err) => {
                warn!(error = %err, "failed to load listing");
                Err(ClientError::NotFound)
            }
        }
    }
}
