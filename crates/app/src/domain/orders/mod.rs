//! Orders
//!
//! The pending order doubles as the user's cart: it is created lazily on the
//! first cart interaction, mutated in place, and promoted to `processing` at
//! checkout.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
