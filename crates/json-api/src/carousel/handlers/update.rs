//! Update Carousel Item Handler

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

use pantry_app::domain::carousel::models::CarouselItemUpdate;

use crate::{
    carousel::{errors::into_status_error, index::CarouselItemResponse},
    extensions::*,
    state::State,
};

/// Update Carousel Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCarouselItemRequest {
    pub image_src: String,

    #[serde(default)]
    pub alt_text: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub button_link: String,

    #[serde(default)]
    pub button_text: String,

    /// Display order, ascending
    #[serde(default)]
    pub position: i32,

    pub is_active: bool,
}

impl From<UpdateCarouselItemRequest> for CarouselItemUpdate {
    fn from(request: UpdateCarouselItemRequest) -> Self {
        CarouselItemUpdate {
            image_src: request.image_src,
            alt_text: request.alt_text,
            title: request.title,
            subtitle: request.subtitle,
            button_link: request.button_link,
            button_text: request.button_text,
            position: request.position,
            is_active: request.is_active,
        }
    }
}

/// Update Carousel Item Handler
#[endpoint(
    tags("carousel"),
    summary = "Update Carousel Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carousel item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Carousel item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCarouselItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CarouselItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .carousel
        .update_carousel_item(item.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
