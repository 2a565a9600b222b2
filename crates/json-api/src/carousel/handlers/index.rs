//! Carousel Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::carousel::models::CarouselItem;

use crate::{carousel::errors::into_status_error, extensions::*, state::State};

/// A storefront banner slide.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CarouselItemResponse {
    /// The unique identifier of the slide
    pub uuid: Uuid,

    pub image_src: String,
    pub alt_text: String,
    pub title: String,
    pub subtitle: String,
    pub button_link: String,
    pub button_text: String,

    /// Display order, ascending
    pub position: i32,

    pub is_active: bool,
}

impl From<CarouselItem> for CarouselItemResponse {
    fn from(item: CarouselItem) -> Self {
        CarouselItemResponse {
            uuid: item.uuid.into(),
            image_src: item.image_src,
            alt_text: item.alt_text,
            title: item.title,
            subtitle: item.subtitle,
            button_link: item.button_link,
            button_text: item.button_text,
            position: item.position,
            is_active: item.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CarouselResponse {
    /// Banner slides in display order
    pub items: Vec<CarouselItemResponse>,
}

/// Carousel Index Handler
///
/// Returns banner slides in display order. Pass `active=true` to limit the
/// listing to slides the storefront should show.
#[endpoint(
    tags("carousel"),
    summary = "List Carousel Items",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    active: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<CarouselResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .carousel
        .list_carousel_items(active.into_inner().unwrap_or(false))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CarouselResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
