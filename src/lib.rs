use std::sync::Arc;
use anyhow::Result;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod store;

use config::{Settings, StoreBackend};
use services::OrganizationService;
use store::{DocumentStore, MemoryStore, MongoStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub store: Arc<dyn DocumentStore>,
    pub organizations: Arc<OrganizationService>,
}

impl AppState {
    /// Wire the services around an already connected store
    pub fn new(config: Settings, store: Arc<dyn DocumentStore>) -> Self {
        let organizations = Arc::new(OrganizationService::new(
            store.clone(),
            config.collections.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            organizations,
        }
    }
}

/// Open the document store selected by the database settings
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match settings.database.backend {
        StoreBackend::Mongo => Arc::new(MongoStore::connect(&settings.database).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

/// Create the main Axum application router
pub fn create_app(state: AppState) -> Router {
    // Register API documentation
    let openapi = openapi::ApiDoc::openapi();

    Router::new()
        .merge(routes::api::api_router())
        // Health and monitoring endpoints
        .merge(routes::health::health_router())
        // Serve Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
