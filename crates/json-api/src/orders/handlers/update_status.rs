//! Update Order Status Handler

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

use pantry::lifecycle::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// The lifecycle state to move to
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order along its lifecycle. Backward moves are rejected; any
/// order that has not shipped can still be cancelled.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status: OrderStatus = json
        .into_inner()
        .status
        .parse()
        .map_err(|_| StatusError::bad_request().brief("Unknown order status"))?;

    let updated = state
        .app
        .orders
        .update_order_status(order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::orders::{MockOrdersService, OrdersServiceError, models::OrderUuid};

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        let mut app = MockApp::new();

        app.orders = orders;

        service_as_admin(app, Router::with_path("orders/{order}/status").put(handler))
    }

    #[tokio::test]
    async fn update_status_moves_the_order_forward() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |o, status| *o == uuid && *status == OrderStatus::Shipped)
            .return_once(|o, status| {
                Ok(make_order(o, pantry_app::domain::users::models::UserUuid::new(), status))
            });

        let response: OrderResponse =
            TestClient::put(format!("http://example.com/orders/{uuid}/status"))
                .json(&json!({ "status": "shipped" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(response.order_status, "shipped");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::new();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "Teleported" }))
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn backward_transition_returns_409() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _| {
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Delivered,
                    to: OrderStatus::Processing,
                })
            });

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "processing" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
