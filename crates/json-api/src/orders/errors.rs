//! Order Errors
//!
//! Shared by the cart and order handlers; both surfaces sit on the same
//! service.

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::UnknownUser => StatusError::unauthorized().brief("Unknown user"),
        OrdersServiceError::ProductNotFound => {
            StatusError::not_found().brief("Product not found")
        }
        OrdersServiceError::ItemNotInCart => {
            StatusError::not_found().brief("Product is not in the cart")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        OrdersServiceError::IncompleteShipping => {
            StatusError::bad_request().brief("Shipping address and phone are required")
        }
        OrdersServiceError::InsufficientStock {
            name,
            available,
            requested,
        } => StatusError::bad_request().brief(format!(
            "Only {available} of {name} in stock, {requested} requested"
        )),
        OrdersServiceError::InvalidTransition { from, to } => StatusError::conflict()
            .brief(format!("Order cannot move from {from} to {to}")),
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Pricing(source) => {
            error!("order pricing failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("orders query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
