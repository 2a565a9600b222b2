//! Bundles

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::BundlesServiceError;
pub use service::*;
