use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

/// A user document as stored in the user collection.
///
/// Users are owned by the account subsystem; this service only looks them up by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub deactivated: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            is_verified: true,
            deactivated: false,
        }
    }
}
