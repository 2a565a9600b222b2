//! Create Bundle Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::bundles::models::{BundleUuid, NewBundle};

use crate::{bundles::errors::into_status_error, extensions::*, state::State};

/// Create Bundle Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBundleRequest {
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

impl CreateBundleRequest {
    fn into_new_bundle(self, uuid: BundleUuid) -> NewBundle {
        NewBundle {
            uuid,
            title: self.title,
            category: self.category,
            description: self.description,
            image: self.image,
            price: self.price,
            product_uuids: self.product_uuids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Bundle Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BundleCreatedResponse {
    /// Created bundle UUID
    pub uuid: Uuid,
}

/// Create Bundle Handler
#[endpoint(
    tags("bundles"),
    summary = "Create Bundle",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Bundle created"),
        (status_code = StatusCode::CONFLICT, description = "Bundle already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBundleRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BundleCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = state
        .app
        .bundles
        .create_bundle(json.into_inner().into_new_bundle(BundleUuid::new()))
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/bundles/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(BundleCreatedResponse { uuid: uuid.into() }))
}
