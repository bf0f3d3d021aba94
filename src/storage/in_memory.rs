//! In-memory implementation of ListingStore for testing and development

use super::ListingStore;
use crate::core::filter::ListingFilter;
use crate::core::patch;
use ::mongodb::bson::oid::ObjectId;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory listing store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Identifiers are freshly generated ObjectIds, keyed by their hex form.
#[derive(Clone)]
pub struct InMemoryListingStore {
    documents: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
}

impl InMemoryListingStore {
    /// Create a new in-memory listing store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingStore for InMemoryListingStore {
    async fn insert(&self, mut document: Map<String, Value>) -> Result<Value> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = ObjectId::new().to_hex();
        document.insert("_id".to_string(), Value::String(id.clone()));
        documents.insert(id, document.clone());

        Ok(Value::Object(document))
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<Value>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(documents
            .get(&id.to_hex())
            .map(|doc| Value::Object(doc.clone())))
    }

    async fn query(&self, filter: &ListingFilter) -> Result<Vec<Value>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(documents
            .values()
            .map(|doc| Value::Object(doc.clone()))
            .filter(|doc| filter.matches(doc))
            .collect())
    }

    async fn update(&self, id: &ObjectId, fields: Map<String, Value>) -> Result<Option<Value>> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match documents.get_mut(&id.to_hex()) {
            Some(document) => {
                patch::apply(document, fields);
                Ok(Some(Value::Object(document.clone())))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(documents.remove(&id.to_hex()).is_some())
    }
}
