//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// The new quantity; zero removes the line
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authed_user_or_401()?;

    let cart = state
        .app
        .orders
        .update_item_quantity(
            user.uuid,
            product.into_inner().into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
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

        service_as_customer(app, Router::with_path("cart/items/{product}").put(handler))
    }

    #[tokio::test]
    async fn update_item_sets_the_quantity() -> TestResult {
        let product = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_item_quantity()
            .once()
            .withf(move |user, p, quantity| {
                *user == TEST_USER_UUID.into() && *p == product.into() && *quantity == 4
            })
            .return_once(|user, _, _| Ok(make_order(OrderUuid::new(), user, OrderStatus::Pending)));

        let res = TestClient::put(format!("http://example.com/cart/items/{product}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn update_absent_item_returns_404() -> TestResult {
        let product = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_item_quantity()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::ItemNotInCart));

        let res = TestClient::put(format!("http://example.com/cart/items/{product}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
