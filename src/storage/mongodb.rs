//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Listings live in a single collection. Documents cross this module in
//! wire form — JSON objects whose `_id` is a 24-char hex string — and are
//! stored with a native ObjectId `_id`. The conversion helpers below own
//! that translation in both directions; everything else is a direct mapping
//! of store operations onto collection calls.
//!
//! Partial updates become a top-level `$set`, which gives the shallow
//! overwrite semantics the service documents: a nested object in the patch
//! replaces the stored nested value wholesale.

use super::ListingStore;
use crate::core::filter::ListingFilter;
use ::mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use ::mongodb::options::ReturnDocument;
use ::mongodb::{Collection, Database};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde_json::{Map, Value};

/// Collection holding all listing documents.
const COLLECTION_NAME: &str = "listings";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a wire JSON object into a BSON document, turning a hex `_id`
/// string into a native ObjectId.
fn document_from_json(mut fields: Map<String, Value>) -> Result<Document> {
    let id = match fields.remove("_id") {
        Some(Value::String(hex)) => Some(
            ObjectId::parse_str(&hex)
                .map_err(|e| anyhow!("Invalid ObjectId '{}': {}", hex, e))?,
        ),
        Some(other) => return Err(anyhow!("Expected hex string _id, got {}", other)),
        None => None,
    };

    let bson = ::mongodb::bson::to_bson(&Value::Object(fields))
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;
    let mut doc = match bson {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(oid) = id {
        doc.insert("_id", oid);
    }

    Ok(doc)
}

/// Convert a stored BSON document back into wire JSON, rendering the
/// ObjectId `_id` as its hex string.
fn json_from_document(mut doc: Document) -> Value {
    let id = doc.remove("_id");
    let mut value = Bson::Document(doc).into_relaxed_extjson();

    if let (Some(id), Some(object)) = (id, value.as_object_mut()) {
        let id_value = match id {
            Bson::ObjectId(oid) => Value::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        };
        object.insert("_id".to_string(), id_value);
    }

    value
}

/// Build the Mongo query document for the normalized filter criteria.
///
/// NaN sentinels flow through as doubles; NaN equality matches no document,
/// which is exactly the contract for non-numeric filter input.
fn filter_to_document(filter: &ListingFilter) -> Document {
    let mut query = Document::new();

    if let Some(emirate) = &filter.emirate {
        query.insert("location.emirate", emirate.as_str());
    }
    if let Some(city) = &filter.city {
        query.insert("location.city", city.as_str());
    }
    if let Some(community) = &filter.community {
        query.insert("location.community", community.as_str());
    }
    if let Some(property_type) = &filter.property_type {
        query.insert("propertyType", property_type.as_str());
    }
    if let Some(purpose) = &filter.purpose {
        query.insert("purpose", purpose.as_str());
    }
    if let Some(published) = filter.is_published {
        query.insert("isPublished", published);
    }
    if let Some(bedrooms) = filter.bedrooms {
        query.insert("bedrooms", bedrooms);
    }
    if let Some(bathrooms) = filter.bathrooms {
        query.insert("bathrooms", bathrooms);
    }
    if filter.min_price.is_some() || filter.max_price.is_some() {
        let mut range = Document::new();
        if let Some(min) = filter.min_price {
            range.insert("$gte", min);
        }
        if let Some(max) = filter.max_price {
            range.insert("$lte", max);
        }
        query.insert("price", range);
    }

    query
}

// ---------------------------------------------------------------------------
// MongoListingStore
// ---------------------------------------------------------------------------

/// Listing storage backed by MongoDB.
#[derive(Clone, Debug)]
pub struct MongoListingStore {
    database: Database,
}

impl MongoListingStore {
    /// Create a new `MongoListingStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION_NAME)
    }
}

#[async_trait]
impl ListingStore for MongoListingStore {
    /// Insert the document and read it back to return the stored version.
    async fn insert(&self, document: Map<String, Value>) -> Result<Value> {
        let doc = document_from_json(document)?;

        let result = self
            .collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to insert listing: {}", e))?;

        let stored = self
            .collection()
            .find_one(doc! { "_id": result.inserted_id })
            .await
            .map_err(|e| anyhow!("Failed to read back inserted listing: {}", e))?
            .ok_or_else(|| anyhow!("Listing not found after insert"))?;

        Ok(json_from_document(stored))
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<Value>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to fetch listing: {}", e))?;

        Ok(doc.map(json_from_document))
    }

    async fn query(&self, filter: &ListingFilter) -> Result<Vec<Value>> {
        let cursor = self
            .collection()
            .find(filter_to_document(filter))
            .await
            .map_err(|e| anyhow!("Failed to query listings: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect listings: {}", e))?;

        Ok(docs.into_iter().map(json_from_document).collect())
    }

    async fn update(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Value>> {
        // An empty $set is a server error; an empty patch is just a read.
        if fields.is_empty() {
            return self.find(id).await;
        }

        let set = document_from_json(fields)?;

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update listing: {}", e))?;

        Ok(updated.map(json_from_document))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to delete listing: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}
