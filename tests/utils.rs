use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bson::{doc, oid::ObjectId, Document};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use zccore::config::Settings;
use zccore::models::User;
use zccore::store::{DocumentStore, MemoryStore};
use zccore::{create_app, AppState};

pub const DEFAULT_USER: &str = "testUser@gmail.com";

/// Memory store that records how often each operation was issued
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    finds: AtomicUsize,
    inserts: AtomicUsize,
}

impl CountingStore {
    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.inner.count(collection).await
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_one(collection, filter).await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_one(collection, document).await
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64> {
        self.inner.delete_many(collection, filter).await
    }

    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }
}

/// Store whose every operation fails, standing in for an unreachable cluster
pub struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn find_one(&self, _collection: &str, _filter: Document) -> Result<Option<Document>> {
        bail!("server selection timeout")
    }

    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<ObjectId> {
        bail!("server selection timeout")
    }

    async fn delete_many(&self, _collection: &str, _filter: Document) -> Result<u64> {
        bail!("server selection timeout")
    }

    async fn health_check(&self) -> Result<()> {
        bail!("server selection timeout")
    }
}

/// Application under test plus the reference data it was seeded with
pub struct TestApp {
    pub app: Router,
    pub store: Arc<CountingStore>,
    seeded_users: Vec<ObjectId>,
}

impl TestApp {
    /// Build the router over a fresh store and seed the default user through it
    pub async fn setup() -> Result<Self> {
        let store = Arc::new(CountingStore::default());
        let app = create_app(AppState::new(Settings::in_memory(), store.clone()));

        let mut test_app = Self {
            app,
            store,
            seeded_users: Vec::new(),
        };
        test_app.seed_user(User::new(DEFAULT_USER)).await?;
        Ok(test_app)
    }

    pub async fn seed_user(&mut self, user: User) -> Result<ObjectId> {
        let users = Settings::in_memory().collections.user_collection;
        if self
            .store
            .find_one(&users, doc! { "email": user.email.as_str() })
            .await?
            .is_some()
        {
            bail!("user {} exists", user.email);
        }

        let id = self
            .store
            .insert_one(&users, bson::to_document(&user)?)
            .await?;
        self.seeded_users.push(id);
        Ok(id)
    }

    /// Remove the seeded users and any organization they created
    pub async fn teardown(self) -> Result<()> {
        let collections = Settings::in_memory().collections;
        for id in self.seeded_users {
            self.store
                .delete_many(&collections.organization_collection, doc! { "creator_id": id })
                .await?;
            self.store
                .delete_many(&collections.user_collection, doc! { "_id": id })
                .await?;
        }
        Ok(())
    }

    pub async fn post_organization(&self, body: Option<&str>) -> (StatusCode, Value) {
        let body = match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method("POST")
            .uri("/organizations")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        send(&self.app, request).await
    }

    pub async fn get_organization(&self, id: &str) -> (StatusCode, Value) {
        get(&self.app, &format!("/organizations/{}", id)).await
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
