//! Sales CSV Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::*,
};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

/// Sales CSV Handler
///
/// Streams the sales export as a CSV attachment, one row per order line
/// item.
#[endpoint(
    tags("reports"),
    summary = "Sales CSV Export",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "CSV export"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let csv = state
        .app
        .reports
        .sales_csv()
        .await
        .map_err(into_status_error)?;

    res.add_header(CONTENT_TYPE, "text/csv; charset=utf-8", true)
        .or_500("failed to set content type")?
        .add_header(CONTENT_DISPOSITION, "attachment; filename=\"orders.csv\"", true)
        .or_500("failed to set content disposition")?
        .write_body(csv)
        .or_500("failed to write csv body")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry_app::domain::reports::MockReportsService;

    use crate::test_helpers::{MockApp, service_as_admin};

    use super::*;

    #[tokio::test]
    async fn sales_csv_returns_the_export_as_an_attachment() -> TestResult {
        let mut reports = MockReportsService::new();

        reports
            .expect_sales_csv()
            .once()
            .return_once(|| Ok("order_uuid,date_ordered\r\n".to_string()));

        let mut app = MockApp::new();
        app.reports = reports;

        let service = service_as_admin(app, Router::with_path("reports/orders.csv").get(handler));

        let mut res = TestClient::get("http://example.com/reports/orders.csv")
            .send(&service)
            .await;

        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(content_type.as_deref(), Some("text/csv; charset=utf-8"));
        assert!(body.starts_with("order_uuid,date_ordered"));

        Ok(())
    }
}
