//! Auth data models.

use uuid::Uuid;

use crate::domain::users::models::UserUuid;

/// The caller identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthedUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// API token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub token: String,
}
