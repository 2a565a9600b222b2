//! Get Bundle Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::bundles::models::Bundle;

use crate::{bundles::errors::into_status_error, extensions::*, state::State};

/// A curated multi-product offer sold at its own price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BundleResponse {
    /// The unique identifier of the bundle
    pub uuid: Uuid,

    pub title: String,
    pub category: String,
    pub description: String,
    pub image: String,

    /// Bundle price in minor units
    pub price: u64,

    /// The products included in the bundle
    pub product_uuids: Vec<Uuid>,

    pub created_at: String,
}

impl From<Bundle> for BundleResponse {
    fn from(bundle: Bundle) -> Self {
        BundleResponse {
            uuid: bundle.uuid.into(),
            title: bundle.title,
            category: bundle.category,
            description: bundle.description,
            image: bundle.image,
            price: bundle.price,
            product_uuids: bundle.product_uuids.into_iter().map(Into::into).collect(),
            created_at: bundle.created_at.to_string(),
        }
    }
}

/// Get Bundle Handler
#[endpoint(
    tags("bundles"),
    summary = "Get Bundle",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    bundle: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BundleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let bundle = state
        .app
        .bundles
        .get_bundle(bundle.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(bundle.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry_app::domain::bundles::{
        BundlesServiceError, MockBundlesService, models::BundleUuid,
    };

    use crate::{
        bundles::handlers::tests::make_bundle,
        test_helpers::{MockApp, service_as_customer},
    };

    use super::*;

    fn make_service(bundles: MockBundlesService) -> Service {
        let mut app = MockApp::new();

        app.bundles = bundles;

        service_as_customer(app, Router::with_path("bundles/{bundle}").get(handler))
    }

    #[tokio::test]
    async fn get_returns_bundle_with_products() -> TestResult {
        let uuid = BundleUuid::new();

        let mut bundles = MockBundlesService::new();

        bundles
            .expect_get_bundle()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |u| Ok(make_bundle(u, "Movie Night", 19_99)));

        let response: BundleResponse =
            TestClient::get(format!("http://example.com/bundles/{uuid}"))
                .send(&make_service(bundles))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.product_uuids.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_bundle_returns_404() -> TestResult {
        let uuid = BundleUuid::new();

        let mut bundles = MockBundlesService::new();

        bundles
            .expect_get_bundle()
            .once()
            .return_once(|_| Err(BundlesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/bundles/{uuid}"))
            .send(&make_service(bundles))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
