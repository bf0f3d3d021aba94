//! Typed HTTP client for the listings API

use super::error::ClientError;
use crate::core::filter::ListingQuery;
use crate::core::listing::Listing;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Client for one listings API server.
#[derive(Clone)]
pub struct ListingsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ListingsClient {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn listings_url(&self) -> String {
        format!("{}/api/listings", self.base_url)
    }

    fn listing_url(&self, id: &str) -> String {
        format!("{}/api/listings/{}", self.base_url, id)
    }

    /// Turn a non-success response into a typed error.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// `GET /` — liveness text.
    pub async fn ping(&self) -> Result<String, ClientError> {
        let response = self.http.get(format!("{}/", self.base_url)).send().await?;
        Ok(Self::check(response).await?.text().await?)
    }

    /// `POST /api/listings` — create a listing, returning the stored
    /// document with its assigned identifier.
    pub async fn create(&self, listing: &Listing) -> Result<Listing, ClientError> {
        let response = self
            .http
            .post(self.listings_url())
            .json(listing)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /api/listings` — fetch listings matching the query.
    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<Listing>, ClientError> {
        let response = self
            .http
            .get(self.listings_url())
            .query(&query.to_query_pairs())
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `GET /api/listings/{id}` — fetch one listing.
    pub async fn get(&self, id: &str) -> Result<Listing, ClientError> {
        let response = self.http.get(self.listing_url(id)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PUT /api/listings/{id}` — partial update with arbitrary fields.
    pub async fn update(&self, id: &str, fields: &Value) -> Result<Listing, ClientError> {
        let response = self
            .http
            .put(self.listing_url(id))
            .json(fields)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `DELETE /api/listings/{id}`.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let response = self.http.delete(self.listing_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
