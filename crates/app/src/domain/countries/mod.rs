//! Countries

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CountriesServiceError;
pub use service::*;
