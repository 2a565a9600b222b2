//! Category Models

use jiff::Timestamp;
use pantry::catalog::EntityStatus;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub stock: u64,
    pub status: EntityStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub stock: u64,
    pub status: EntityStatus,
}

/// Category Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub stock: u64,
    pub status: EntityStatus,
}
