use super::DocumentStore;
use crate::config::settings::DatabaseSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::{options::ClientOptions, Client, Database};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, info};

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to the cluster described by `settings` and verify it answers a ping
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let cluster_url = settings
            .cluster_url
            .as_ref()
            .context("CLUSTER_URL must be set for the mongo backend")?;

        let mut options = ClientOptions::parse(cluster_url.expose_secret())
            .await
            .context("Failed to parse MongoDB cluster URL")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(Duration::from_secs(settings.connect_timeout_seconds));
        options.server_selection_timeout =
            Some(Duration::from_secs(settings.connect_timeout_seconds));

        let client = Client::with_options(options).context("Failed to create MongoDB client")?;
        let store = Self {
            database: client.database(&settings.db_name),
        };

        store
            .health_check()
            .await
            .context("Failed to reach MongoDB cluster")?;

        info!("Connected to MongoDB database '{}'", settings.db_name);
        Ok(store)
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        debug!("find_one on '{}' with {}", collection, filter);
        self.collection(collection)
            .find_one(filter, None)
            .await
            .with_context(|| format!("Failed to query collection '{}'", collection))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId> {
        let result = self
            .collection(collection)
            .insert_one(document, None)
            .await
            .with_context(|| format!("Failed to insert into collection '{}'", collection))?;

        result
            .inserted_id
            .as_object_id()
            .context("Inserted document did not receive an ObjectId")
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_many(filter, None)
            .await
            .with_context(|| format!("Failed to delete from collection '{}'", collection))?;

        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}
