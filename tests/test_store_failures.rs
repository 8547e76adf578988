mod utils;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use utils::{get, message, send, UnavailableStore};
use zccore::config::Settings;
use zccore::{create_app, AppState};

fn unavailable_app() -> Router {
    create_app(AppState::new(
        Settings::in_memory(),
        Arc::new(UnavailableStore),
    ))
}

#[tokio::test]
async fn test_health_reports_store_down() {
    let (status, body) = get(&unavailable_app(), "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["store"], "down");
}

#[tokio::test]
async fn test_create_hides_store_errors() {
    let request = Request::builder()
        .method("POST")
        .uri("/organizations")
        .body(Body::from(r#"{"creator_email": "testUser@gmail.com"}"#))
        .unwrap();

    let (status, body) = send(&unavailable_app(), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), "internal server error");
}

#[tokio::test]
async fn test_validation_still_runs_without_store() {
    let app = unavailable_app();

    let request = Request::builder()
        .method("POST")
        .uri("/organizations")
        .body(Body::from(r#"{"creator_email": "badmailformat.xyz"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "invalid email format : badmailformat.xyz");

    let (status, _) = get(&app, "/organizations/12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, &format!("/organizations/{}", ObjectId::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(&body), "internal server error");
}

#[tokio::test]
async fn test_health_and_docs_with_memory_store() {
    let app = create_app(AppState::new(
        Settings::in_memory(),
        Arc::new(zccore::store::MemoryStore::new()),
    ));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["store"], "up");

    let (status, openapi) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(openapi["paths"]["/organizations/{id}"].is_object());
}
