//! Filterable listing browser
//!
//! Owns the filter criteria and the fetched result collection. `apply`
//! re-fetches with the current criteria; `reset` clears the criteria and
//! refetches as a direct continuation of the completed state update — the
//! fetch can never observe stale criteria.

use super::api::ListingsClient;
use super::error::ClientError;
use crate::core::filter::ListingQuery;
use crate::core::listing::Listing;
use tracing::warn;

/// Browser over the listings collection.
pub struct ListingBrowser {
    client: ListingsClient,
    filters: ListingQuery,
    results: Vec<Listing>,
}

impl ListingBrowser {
    pub fn new(client: ListingsClient) -> Self {
        Self {
            client,
            filters: ListingQuery::default(),
            results: Vec::new(),
        }
    }

    /// Current filter criteria.
    pub fn filters(&self) -> &ListingQuery {
        &self.filters
    }

    /// Mutable access to the filter criteria; call [`apply`](Self::apply)
    /// to take effect.
    pub fn filters_mut(&mut self) -> &mut ListingQuery {
        &mut self.filters
    }

    /// The most recently fetched results.
    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    /// Fetch with the current criteria, replacing the results.
    ///
    /// On failure the previous results are kept.
    pub async fn apply(&mut self) -> Result<&[Listing], ClientError> {
        match self.client.list(&self.filters).await {
            Ok(listings) => {
                self.results = listings;
                Ok(&self.results)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch listings");
                Err(err)
            }
        }
    }

    /// Clear all criteria, then refetch.
    pub async fn reset(&mut self) -> Result<&[Listing], ClientError> {
        self.filters = ListingQuery::default();
        // The refetch runs only after the criteria update above completed.
        self.apply().await
    }
}
