use utoipa::OpenApi;
use crate::error::ErrorBody;
use crate::handlers::{health, organizations};
use crate::models::{CreateOrganizationRequest, OrganizationResponse};

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        health::check,

        // Organization endpoints
        organizations::create_organization,
        organizations::get_organization,
    ),
    components(
        schemas(
            health::HealthResponse,
            ErrorBody,
            CreateOrganizationRequest,
            OrganizationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "organizations", description = "Organization creation and lookup"),
    )
)]
pub struct ApiDoc;
