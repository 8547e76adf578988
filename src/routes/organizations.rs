use crate::handlers::organizations;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn organization_router() -> Router<AppState> {
    Router::new()
        .route("/", post(organizations::create_organization))
        .route("/:id", get(organizations::get_organization))
}
