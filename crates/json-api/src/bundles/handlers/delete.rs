//! Delete Bundle Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{bundles::errors::into_status_error, extensions::*, state::State};

/// Delete Bundle Handler
#[endpoint(
    tags("bundles"),
    summary = "Delete Bundle",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bundle deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Bundle not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    bundle: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .bundles
        .delete_bundle(bundle.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
