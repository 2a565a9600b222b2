//! Domain modules

pub mod bundles;
pub mod carousel;
pub mod categories;
pub mod countries;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod users;

pub(crate) mod rows;
