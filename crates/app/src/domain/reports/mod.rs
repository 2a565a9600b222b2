//! Back-office reporting over orders, products and users.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use service::*;
