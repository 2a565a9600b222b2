//! Bearer-token authentication.

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use service::*;
pub use token::{format_api_token, generate_api_token_secret, hash_api_token};
