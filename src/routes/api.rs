use crate::AppState;
use axum::Router;

pub fn api_router() -> Router<AppState> {
    Router::new()
        // Mount organization routes under /organizations prefix
        .nest("/organizations", super::organizations::organization_router())
}
