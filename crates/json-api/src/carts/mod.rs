//! Cart
//!
//! The cart is the authenticated user's pending order; these handlers sit
//! on the orders service.

mod handlers;

pub(crate) use handlers::*;
