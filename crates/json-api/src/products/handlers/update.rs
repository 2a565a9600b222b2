//! Update Product Handler

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

use pantry_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*, products::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
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

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            rich_description: request.rich_description,
            brand: request.brand,
            image: request.image,
            images: request.images,
            price: request.price,
            category_uuid: request.category_uuid.into(),
            country_uuid: request.country_uuid.into(),
            count_in_stock: request.count_in_stock,
        }
    }
}

/// Update Product Handler
///
/// Replaces the product's catalog fields. Prices already captured on order
/// lines are not touched.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .products
        .update_product(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
