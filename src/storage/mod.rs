//! Storage backends for listing documents
//!
//! The store keeps raw JSON documents keyed by ObjectId and knows nothing
//! about the listing schema — validation happens above it, in the service.
//! Two implementations: MongoDB for production and an in-memory map for
//! tests and development.

pub mod in_memory;
pub mod mongodb;

pub use in_memory::InMemoryListingStore;
pub use mongodb::MongoListingStore;

use crate::core::filter::ListingFilter;
use ::mongodb::bson::oid::ObjectId;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Document storage for listings.
///
/// Documents are JSON objects; the store assigns the identifier on insert
/// and carries it on the wire as the `_id` field (24-char hex).
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Insert a document (without `_id`) and return the stored document,
    /// identifier included.
    async fn insert(&self, document: Map<String, Value>) -> Result<Value>;

    /// Fetch one document by identifier.
    async fn find(&self, id: &ObjectId) -> Result<Option<Value>>;

    /// Fetch every document matching the filter. No pagination, no sort.
    async fn query(&self, filter: &ListingFilter) -> Result<Vec<Value>>;

    /// Overwrite the given top-level fields of a document. Returns the
    /// updated document, or `None` if no document has this identifier.
    async fn update(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Value>>;

    /// Delete by identifier. Returns whether a document was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool>;
}
