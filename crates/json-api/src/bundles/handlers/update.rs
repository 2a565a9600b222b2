//! Update Bundle Handler

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

use pantry_app::domain::bundles::models::BundleUpdate;

use crate::{
    bundles::{errors::into_status_error, get::BundleResponse},
    extensions::*,
    state::State,
};

/// Update Bundle Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateBundleRequest {
    pub title: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    /// Bundle price in minor units
    pub price: u64,

    /// The products included in the bundle
    pub product_uuids: Vec<Uuid>,
}

impl From<UpdateBundleRequest> for BundleUpdate {
    fn from(request: UpdateBundleRequest) -> Self {
        BundleUpdate {
            title: request.title,
            category: request.category,
            description: request.description,
            image: request.image,
            price: request.price,
            product_uuids: request.product_uuids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Update Bundle Handler
#[endpoint(
    tags("bundles"),
    summary = "Update Bundle",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bundle updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Bundle not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    bundle: PathParam<Uuid>,
    json: JsonBody<UpdateBundleRequest>,
    depot: &mut Depot,
) -> Result<Json<BundleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .bundles
        .update_bundle(bundle.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
