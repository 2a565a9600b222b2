//! Country Models

use jiff::Timestamp;
use pantry::catalog::EntityStatus;

use crate::uuids::TypedUuid;

/// Country UUID
pub type CountryUuid = TypedUuid<Country>;

/// Country of origin for catalog products.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub uuid: CountryUuid,
    pub name: String,
    pub code: String,
    pub flag_image: String,
    pub description: String,
    pub stock: u64,
    pub status: EntityStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Country Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountry {
    pub uuid: CountryUuid,
    pub name: String,
    pub code: String,
    pub flag_image: String,
    pub description: String,
    pub stock: u64,
    pub status: EntityStatus,
}

/// Country Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct CountryUpdate {
    pub name: String,
    pub code: String,
    pub flag_image: String,
    pub description: String,
    pub stock: u64,
    pub status: EntityStatus,
}
