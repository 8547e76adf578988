use super::DocumentStore;
use anyhow::Result;
use async_trait::async_trait;
use bson::{oid::ObjectId, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process document store, used for local development and tests
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &filter)))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|doc| doc.get_object_id("_id").ok() == Some(id)) {
            anyhow::bail!("duplicate _id {} in collection '{}'", id, collection);
        }
        docs.push(document);

        Ok(id)
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|doc| !matches(doc, &filter));
        Ok((before - docs.len()) as u64)
    }

    async fn health_check(&self) -> Result<()> {
        // Memory store is always healthy
        Ok(())
    }
}
