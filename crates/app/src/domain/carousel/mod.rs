//! Carousel

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CarouselServiceError;
pub use service::*;
