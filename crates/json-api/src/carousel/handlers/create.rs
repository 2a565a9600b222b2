//! Create Carousel Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::carousel::models::{CarouselItemUuid, NewCarouselItem};

use crate::{carousel::errors::into_status_error, extensions::*, state::State};

/// Create Carousel Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCarouselItemRequest {
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

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CreateCarouselItemRequest {
    fn into_new_item(self, uuid: CarouselItemUuid) -> NewCarouselItem {
        NewCarouselItem {
            uuid,
            image_src: self.image_src,
            alt_text: self.alt_text,
            title: self.title,
            subtitle: self.subtitle,
            button_link: self.button_link,
            button_text: self.button_text,
            position: self.position,
            is_active: self.is_active,
        }
    }
}

/// Carousel Item Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CarouselItemCreatedResponse {
    /// Created slide UUID
    pub uuid: Uuid,
}

/// Create Carousel Item Handler
#[endpoint(
    tags("carousel"),
    summary = "Create Carousel Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Carousel item created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCarouselItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CarouselItemCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let uuid = state
        .app
        .carousel
        .create_carousel_item(json.into_inner().into_new_item(CarouselItemUuid::new()))
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/carousel/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CarouselItemCreatedResponse { uuid: uuid.into() }))
}
