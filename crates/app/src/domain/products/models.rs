//! Product Models

use jiff::Timestamp;

use crate::{
    domain::{categories::models::CategoryUuid, countries::models::CountryUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub image: String,
    pub images: Vec<String>,
    pub price: u64,
    pub category_uuid: CategoryUuid,
    pub country_uuid: CountryUuid,
    pub count_in_stock: u16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Catalog projection of a product with its lookup names joined in.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: Product,
    pub category_name: String,
    pub country_name: String,
    pub country_code: String,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub image: String,
    pub images: Vec<String>,
    pub price: u64,
    pub category_uuid: CategoryUuid,
    pub country_uuid: CountryUuid,
    pub count_in_stock: u16,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub image: String,
    pub images: Vec<String>,
    pub price: u64,
    pub category_uuid: CategoryUuid,
    pub country_uuid: CountryUuid,
    pub count_in_stock: u16,
}

/// Catalog listing filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductFilter {
    pub category_uuid: Option<CategoryUuid>,
    pub country_uuid: Option<CountryUuid>,
}
