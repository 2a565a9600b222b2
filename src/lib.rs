//! Pantry
//!
//! Core storefront domain types: order lifecycle, currencies and the
//! checkout pricing policy. This crate is pure; persistence and HTTP
//! live in `pantry-app` and `pantry-json`.

pub mod catalog;
pub mod lifecycle;
pub mod money;
pub mod pricing;
