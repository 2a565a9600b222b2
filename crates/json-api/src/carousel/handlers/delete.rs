//! Delete Carousel Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carousel::errors::into_status_error, extensions::*, state::State};

/// Delete Carousel Item Handler
#[endpoint(
    tags("carousel"),
    summary = "Delete Carousel Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Carousel item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Carousel item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carousel
        .delete_carousel_item(item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
