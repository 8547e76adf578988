// src/handlers/organizations.rs
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::Uri,
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    models::{validate_create_request, OrganizationResponse},
    AppState,
};

/// Create a new organization
#[utoipa::path(
    post,
    path = "/organizations",
    tag = "organizations",
    request_body = crate::models::CreateOrganizationRequest,
    responses(
        (status = 200, description = "Organization created successfully", body = OrganizationResponse),
        (status = 400, description = "Invalid email or unknown creator", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    )
)]
pub async fn create_organization(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<OrganizationResponse>> {
    // An oversized or unreadable body is treated like an empty one
    let body = body.unwrap_or_else(|rejection| {
        tracing::debug!("Unreadable organization request body: {}", rejection);
        Bytes::new()
    });
    let intent = validate_create_request(&body)?;
    let organization = state.organizations.create(intent).await?;

    Ok(Json(organization.into()))
}

/// Get organization details by ID
#[utoipa::path(
    get,
    path = "/organizations/{id}",
    tag = "organizations",
    params(
        ("id" = String, Path, description = "24-character hexadecimal organization ID")
    ),
    responses(
        (status = 200, description = "Organization details retrieved successfully", body = OrganizationResponse),
        (status = 400, description = "Malformed organization ID", body = crate::error::ErrorBody),
        (status = 404, description = "Organization not found", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    )
)]
pub async fn get_organization(
    State(state): State<AppState>,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<OrganizationResponse>> {
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!("Undecodable organization id in {}: {}", uri, rejection);
        let raw = uri.path().rsplit('/').next().unwrap_or_default();
        ApiError::BadRequest(format!("invalid organization id : {}", raw))
    })?;
    let organization = state.organizations.get(&id).await?;

    Ok(Json(organization.into()))
}
