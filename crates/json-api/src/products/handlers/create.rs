//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::products::models::{NewProduct, ProductUuid};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub rich_description: String,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub images: Vec<String>,

    /// Price in minor units
    pub price: u64,

    pub category_uuid: Uuid,
    pub country_uuid: Uuid,

    #[serde(default)]
    pub count_in_stock: u16,
}

impl CreateProductRequest {
    fn into_new_product(self, uuid: ProductUuid) -> NewProduct {
        NewProduct {
            uuid,
            name: self.name,
            description: self.description,
            rich_description: self.rich_description,
            brand: self.brand,
            image: self.image,
            images: self.images,
            price: self.price,
            category_uuid: self.category_uuid.into(),
            country_uuid: self.country_uuid.into(),
            count_in_stock: self.count_in_stock,
        }
    }
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    /// Created product UUID
    pub uuid: Uuid,
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = state
        .app
        .products
        .create_product(json.into_inner().into_new_product(ProductUuid::new()))
        .await
        .map_err(into_status_error)?
        .product
        .uuid;

    res.add_header(LOCATION, format!("/products/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::{
        products::handlers::tests::make_details,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        let mut app = MockApp::new();

        app.products = products;

        service_as_admin(app, Router::with_path("products").post(handler))
    }

    fn request_body(category: Uuid, country: Uuid) -> serde_json::Value {
        json!({
            "name": "Wasabi Peas",
            "brand": "Pantry",
            "price": 7_50,
            "category_uuid": category,
            "country_uuid": country,
            "count_in_stock": 12,
        })
    }

    #[tokio::test]
    async fn create_returns_201_with_location() -> TestResult {
        let category = Uuid::now_v7();
        let country = Uuid::now_v7();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |new| {
                new.name == "Wasabi Peas"
                    && new.price == 7_50
                    && new.category_uuid == category.into()
                    && new.country_uuid == country.into()
                    && new.count_in_stock == 12
            })
            .return_once(|new| Ok(make_details(new.uuid, "Wasabi Peas", 7_50)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&request_body(category, country))
            .send(&make_service(products))
            .await;

        let body: ProductCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.uuid).as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn create_unknown_category_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/products")
            .json(&request_body(Uuid::now_v7(), Uuid::now_v7()))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_name_returns_409() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&request_body(Uuid::now_v7(), Uuid::now_v7()))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
