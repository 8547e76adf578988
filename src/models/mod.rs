pub mod organization;
pub mod user;

pub use organization::{
    validate_create_request, CreateIntent, CreateOrganizationRequest, Organization,
    OrganizationResponse, RequestValidationError,
};
pub use user::User;
