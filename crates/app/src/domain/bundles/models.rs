//! Bundle Models

use jiff::Timestamp;

use crate::{domain::products::models::ProductUuid, uuids::TypedUuid};

/// Bundle UUID
pub type BundleUuid = TypedUuid<Bundle>;

/// A curated multi-product offer sold at its own price.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub uuid: BundleUuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub price: u64,
    pub product_uuids: Vec<ProductUuid>,
    pub created_at: Timestamp,
}

/// New Bundle Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBundle {
    pub uuid: BundleUuid,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub price: u64,
    pub product_uuids: Vec<ProductUuid>,
}

/// Bundle Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct BundleUpdate {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub price: u64,
    pub product_uuids: Vec<ProductUuid>,
}
