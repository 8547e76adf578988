use anyhow::Result;
use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

/// Document store trait that must be implemented by all persistence backends
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Find the first document in `collection` whose fields equal every entry of `filter`
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>>;

    /// Insert a document, returning the identifier the store assigned to it
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId>;

    /// Delete every document matching `filter`, returning how many were removed
    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64>;

    /// Perform a health check on the store
    async fn health_check(&self) -> Result<()>;
}

/// Parse a client supplied identifier into the store's canonical object id.
///
/// Only 24-character hexadecimal tokens are accepted.
pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw).ok()
}

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
