//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Every order, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order Index Handler
///
/// Back-office listing of every order across all users.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry::lifecycle::OrderStatus;
    use pantry_app::domain::{
        orders::{MockOrdersService, models::OrderUuid},
        users::models::UserUuid,
    };

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    #[tokio::test]
    async fn index_returns_all_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| {
            Ok(vec![
                make_order(OrderUuid::new(), UserUuid::new(), OrderStatus::Delivered),
                make_order(OrderUuid::new(), UserUuid::new(), OrderStatus::Processing),
            ])
        });

        let mut app = MockApp::new();
        app.orders = orders;

        let service = service_as_admin(app, Router::with_path("orders").get(handler));

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 2);

        Ok(())
    }
}
