//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pantry::lifecycle::PaymentMethod;
use pantry_app::domain::orders::models::{CheckoutRequest, ShippingAddress};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout shipping address.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutAddress {
    pub country: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,

    #[serde(default)]
    pub special_instructions: String,
}

impl From<CheckoutAddress> for ShippingAddress {
    fn from(address: CheckoutAddress) -> Self {
        ShippingAddress {
            country: address.country,
            city: address.city,
            address: address.address,
            postal_code: address.postal_code,
            special_instructions: address.special_instructions,
        }
    }
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequestBody {
    /// The client's view of the cart. Only checked for presence; the
    /// items charged are the ones stored on the server-side cart.
    pub cart_items: Vec<serde_json::Value>,

    pub shipping_address: CheckoutAddress,
    pub phone: String,
    pub payment_method: String,

    /// Card details are accepted for API compatibility and discarded;
    /// payment capture is simulated.
    #[serde(default)]
    pub payment_details: Option<serde_json::Value>,
}

/// Checkout Handler
///
/// Converts the pending cart into a placed order: prices are re-read from
/// the catalog, stock is checked and decremented, and authoritative totals
/// are computed, all in one transaction.
#[endpoint(
    tags("cart"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequestBody>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authed_user_or_401()?;
    let request = json.into_inner();

    if request.cart_items.is_empty() {
        return Err(StatusError::bad_request().brief("Cart items are missing from the request"));
    }

    let payment_method: PaymentMethod = request
        .payment_method
        .parse()
        .map_err(|_| StatusError::bad_request().brief("Unknown payment method"))?;

    if request.payment_details.is_some() {
        debug!("discarding submitted payment details");
    }

    let order = state
        .app
        .orders
        .checkout(
            user.uuid,
            CheckoutRequest {
                shipping_address: request.shipping_address.into(),
                phone: request.phone,
                payment_method,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry::lifecycle::OrderStatus;
    use pantry_app::domain::orders::{MockOrdersService, OrdersServiceError, models::OrderUuid};

    use crate::{
        orders::tests::make_order,
        test_helpers::{MockApp, TEST_USER_UUID, service_as_customer},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        let mut app = MockApp::new();

        app.orders = orders;

        service_as_customer(app, Router::with_path("cart/checkout").post(handler))
    }

    fn checkout_body() -> serde_json::Value {
        json!({
            "cart_items": [{ "product_uuid": "00000000-0000-0000-0000-000000000000", "quantity": 2 }],
            "shipping_address": {
                "country": "USA",
                "city": "Springfield",
                "address": "12 Elm Street",
                "postal_code": "62704",
            },
            "phone": "555-0199",
            "payment_method": "credit_card",
        })
    }

    #[tokio::test]
    async fn checkout_places_the_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .withf(|user, request| {
                *user == TEST_USER_UUID.into()
                    && request.payment_method == PaymentMethod::CreditCard
                    && request.shipping_address.city == "Springfield"
            })
            .return_once(|user, _| {
                Ok(make_order(OrderUuid::new(), user, OrderStatus::Processing))
            });

        let response: OrderResponse = TestClient::post("http://example.com/cart/checkout")
            .json(&checkout_body())
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.order_status, "processing");
        assert_eq!(response.total, 34_75);

        Ok(())
    }

    #[tokio::test]
    async fn payment_details_are_accepted_and_discarded() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|user, _| {
                Ok(make_order(OrderUuid::new(), user, OrderStatus::Processing))
            });

        let mut body = checkout_body();
        body["payment_details"] = json!({ "card_number": "4111111111111111", "cvv": "123" });

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&body)
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_items_list_returns_400() -> TestResult {
        let mut body = checkout_body();
        body["cart_items"] = json!([]);

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&body)
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_payment_method_returns_400() -> TestResult {
        let mut body = checkout_body();
        body["payment_method"] = json!("Barter");

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&body)
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&checkout_body())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_stock_returns_400_with_details() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_checkout().once().return_once(|_, _| {
            Err(OrdersServiceError::InsufficientStock {
                name: "Wasabi Peas".to_string(),
                available: 2,
                requested: 5,
            })
        });

        let res = TestClient::post("http://example.com/cart/checkout")
            .json(&checkout_body())
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
