//! Order Count Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCountResponse {
    /// Number of orders, carts included
    pub order_count: u64,
}

/// Order Count Handler
#[endpoint(
    tags("reports"),
    summary = "Order Count",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order_count = state
        .app
        .reports
        .order_count()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderCountResponse { order_count }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry_app::domain::reports::MockReportsService;

    use crate::test_helpers::{MockApp, service_as_admin};

    use super::*;

    #[tokio::test]
    async fn order_count_reports_the_count() -> TestResult {
        let mut reports = MockReportsService::new();

        reports.expect_order_count().once().return_once(|| Ok(7));

        let mut app = MockApp::new();
        app.reports = reports;

        let service = service_as_admin(app, Router::with_path("reports/order-count").get(handler));

        let response: OrderCountResponse =
            TestClient::get("http://example.com/reports/order-count")
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(response.order_count, 7);

        Ok(())
    }
}
