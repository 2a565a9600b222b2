//! User Models

use jiff::Timestamp;

use crate::{domain::countries::models::CountryUuid, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country_uuid: Option<CountryUuid>,
    pub created_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country_uuid: Option<CountryUuid>,
}

impl NewUser {
    /// A minimal customer record; the CLI and tests fill only the basics.
    #[must_use]
    pub fn customer(name: &str, email: &str, phone: &str) -> Self {
        Self {
            uuid: UserUuid::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            is_admin: false,
            street: String::new(),
            apartment: String::new(),
            zip: String::new(),
            city: String::new(),
            country_uuid: None,
        }
    }
}
