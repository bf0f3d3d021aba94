//! Listings service
//!
//! The one place that enforces the listing schema: every write is validated
//! here before it reaches the store, and every path identifier is parsed
//! here so a malformed id can never surface as a server error. Handlers
//! stay thin; stores stay schema-agnostic.

use crate::core::error::ListingError;
use crate::core::filter::ListingQuery;
use crate::core::patch;
use crate::core::validation;
use crate::storage::ListingStore;
use ::mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// CRUD operations over listing documents.
#[derive(Clone)]
pub struct ListingsService {
    store: Arc<dyn ListingStore>,
}

impl ListingsService {
    /// Create a service on top of any listing store.
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    /// Parse a path identifier as a store-native ObjectId.
    fn parse_id(id: &str) -> Result<ObjectId, ListingError> {
        ObjectId::parse_str(id).map_err(|_| ListingError::MalformedId { id: id.to_string() })
    }

    /// Pull the object out of a JSON payload.
    fn into_fields(payload: Value) -> Result<Map<String, Value>, ListingError> {
        match payload {
            Value::Object(fields) => Ok(fields),
            _ => Err(ListingError::Validation {
                errors: vec!["payload must be a JSON object".to_string()],
            }),
        }
    }

    /// Validate and insert a new listing; the store assigns the identifier.
    pub async fn create(&self, payload: Value) -> Result<Value, ListingError> {
        validation::validate_create(&payload)
            .map_err(|errors| ListingError::Validation { errors })?;

        let mut fields = Self::into_fields(payload)?;
        // Identity is store-assigned; a client-supplied one is discarded.
        patch::strip_id(&mut fields);

        let stored = self.store.insert(fields).await?;
        debug!(id = stored["_id"].as_str(), "listing created");
        Ok(stored)
    }

    /// List every listing matching the query's criteria.
    pub async fn list(&self, query: &ListingQuery) -> Result<Vec<Value>, ListingError> {
        let filter = query.filter();
        let listings = self.store.query(&filter).await?;
        debug!(count = listings.len(), "listings fetched");
        Ok(listings)
    }

    /// Fetch one listing by its identifier.
    pub async fn get(&self, id: &str) -> Result<Value, ListingError> {
        let oid = Self::parse_id(id)?;
        self.store
            .find(&oid)
            .await?
            .ok_or_else(|| ListingError::NotFound { id: id.to_string() })
    }

    /// Apply a partial update and return the updated document.
    pub async fn update(&self, id: &str, payload: Value) -> Result<Value, ListingError> {
        let oid = Self::parse_id(id)?;

        let mut fields = Self::into_fields(payload)?;
        patch::strip_id(&mut fields);

        validation::validate_update(&Value::Object(fields.clone()))
            .map_err(|errors| ListingError::Validation { errors })?;

        self.store
            .update(&oid, fields)
            .await?
            .ok_or_else(|| ListingError::NotFound { id: id.to_string() })
    }

    /// Delete a listing by its identifier.
    pub async fn delete(&self, id: &str) -> Result<(), ListingError> {
        let oid = Self::parse_id(id)?;

        if self.store.delete(&oid).await? {
            debug!(id, "listing deleted");
            Ok(())
        } else {
            Err(ListingError::NotFound { id: id.to_string() })
        }
    }
}
