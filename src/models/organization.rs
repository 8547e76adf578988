// src/models/organization.rs
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// An organization document as stored in the organization collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    /// Identifier assigned by the store on insert
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Email of the user who created the organization
    pub creator_email: String,
    /// `_id` of the creating user, when the user document carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<ObjectId>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(intent: CreateIntent, creator_id: Option<ObjectId>) -> Self {
        // Mongo stores datetimes at millisecond precision
        let now = DateTime::<Utc>::from_timestamp_millis(Utc::now().timestamp_millis())
            .unwrap_or_else(Utc::now);
        Self {
            id: None,
            creator_email: intent.creator_email,
            creator_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Organization returned in API responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationResponse {
    /// 24-character hexadecimal organization ID
    pub id: String,
    /// Email of the creating user
    pub creator_email: String,
    /// ID of the creating user
    pub creator_id: Option<String>,
    /// When the organization was created
    pub created_at: DateTime<Utc>,
    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id.map(|id| id.to_hex()).unwrap_or_default(),
            creator_email: org.creator_email,
            creator_id: org.creator_id.map(|id| id.to_hex()),
            created_at: org.created_at,
            updated_at: org.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateOrganizationRequest {
    /// Email of an existing user who will own the organization
    #[serde(default)]
    #[validate(email, custom = "validate_email_domain")]
    pub creator_email: String,
}

/// A creation request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntent {
    pub creator_email: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    #[error("invalid email format : {email}")]
    InvalidEmail { email: String },
}

/// Parse and validate a raw organization creation body.
///
/// A body that is empty, not a JSON object, or lacks `creator_email` is reported
/// the same way as a malformed address, with an empty email in the message.
pub fn validate_create_request(raw: &[u8]) -> Result<CreateIntent, RequestValidationError> {
    let request = match serde_json::from_slice::<CreateOrganizationRequest>(raw) {
        Ok(request) => request,
        Err(e) => {
            debug!("Unreadable organization request body: {}", e);
            CreateOrganizationRequest::default()
        }
    };

    if request.validate().is_err() {
        return Err(RequestValidationError::InvalidEmail {
            email: request.creator_email,
        });
    }

    Ok(CreateIntent {
        creator_email: request.creator_email,
    })
}

fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    let domain = email.rsplit_once('@').map(|(_, domain)| domain).unwrap_or("");
    let mut labels = domain.split('.');
    let dotted = domain.contains('.') && labels.all(|label| !label.is_empty());
    if dotted {
        Ok(())
    } else {
        Err(ValidationError::new("email_domain"))
    }
}
