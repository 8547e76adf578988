use anyhow::Context;
use bson::doc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    config::CollectionSettings,
    error::{ApiError, ApiResult},
    models::{CreateIntent, Organization, User},
    store::{parse_object_id, DocumentStore},
};

pub const USER_NOT_FOUND: &str = "user with this email does not exist";
pub const ORGANIZATION_NOT_FOUND: &str = "organization does not exist";

/// Creates and retrieves organizations against a document store
pub struct OrganizationService {
    store: Arc<dyn DocumentStore>,
    collections: CollectionSettings,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn DocumentStore>, collections: CollectionSettings) -> Self {
        Self { store, collections }
    }

    /// Persist a new organization owned by the user named in `intent`.
    ///
    /// Nothing is written unless the creator exists.
    pub async fn create(&self, intent: CreateIntent) -> ApiResult<Organization> {
        let creator = self.find_user_by_email(&intent.creator_email).await?;
        let Some(creator) = creator else {
            warn!("Rejected organization for unknown user {}", intent.creator_email);
            return Err(ApiError::BadRequest(USER_NOT_FOUND.to_string()));
        };

        let mut organization = Organization::new(intent, creator.id);
        let document =
            bson::to_document(&organization).context("Failed to encode organization document")?;
        let id = self
            .store
            .insert_one(&self.collections.organization_collection, document)
            .await
            .context("Failed to insert organization")?;
        organization.id = Some(id);

        info!(
            "Created organization {} for {}",
            id, organization.creator_email
        );
        Ok(organization)
    }

    /// Fetch an organization by its hexadecimal identifier.
    ///
    /// Malformed identifiers are rejected before the store is queried.
    pub async fn get(&self, identifier: &str) -> ApiResult<Organization> {
        let id = parse_object_id(identifier).ok_or_else(|| {
            ApiError::BadRequest(format!("invalid organization id : {}", identifier))
        })?;

        let document = self
            .store
            .find_one(&self.collections.organization_collection, doc! { "_id": id })
            .await
            .context("Failed to fetch organization")?
            .ok_or_else(|| ApiError::NotFound(ORGANIZATION_NOT_FOUND.to_string()))?;

        let organization =
            bson::from_document(document).context("Stored organization document is malformed")?;
        Ok(organization)
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let document = self
            .store
            .find_one(&self.collections.user_collection, doc! { "email": email })
            .await
            .context("Failed to look up user")?;

        match document {
            Some(document) => {
                let user = bson::from_document(document)
                    .context("Stored user document is malformed")?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
