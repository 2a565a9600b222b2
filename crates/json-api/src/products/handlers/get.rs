//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::products::models::ProductDetails;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Catalog product with its lookup names joined in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,
    pub image: String,
    pub images: Vec<String>,

    /// Price in minor units
    pub price: u64,

    pub category_uuid: Uuid,
    pub category_name: String,
    pub country_uuid: Uuid,
    pub country_name: String,
    pub country_code: String,

    pub count_in_stock: u16,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductDetails> for ProductResponse {
    fn from(details: ProductDetails) -> Self {
        let product = details.product;

        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            rich_description: product.rich_description,
            brand: product.brand,
            image: product.image,
            images: product.images,
            price: product.price,
            category_uuid: product.category_uuid.into(),
            category_name: details.category_name,
            country_uuid: product.country_uuid.into(),
            country_name: details.country_name,
            country_code: details.country_code,
            count_in_stock: product.count_in_stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use pantry_app::domain::products::{
        MockProductsService, ProductsServiceError, models::ProductUuid,
    };

    use crate::{
        products::handlers::tests::make_details,
        test_helpers::{MockApp, service_as_customer},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        let mut app = MockApp::new();

        app.products = products;

        service_as_customer(app, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn get_returns_200() -> TestResult {
        let mut products = MockProductsService::new();
        let uuid = ProductUuid::new();

        let details = make_details(uuid, "Wasabi Peas", 7_50);

        products
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(details));

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();
        let uuid = ProductUuid::new();

        products
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
