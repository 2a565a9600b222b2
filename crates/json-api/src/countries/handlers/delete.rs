//! Delete Country Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{countries::errors::into_status_error, extensions::*, state::State};

/// Delete Country Handler
///
/// Fails with a conflict while products still reference the country.
#[endpoint(
    tags("countries"),
    summary = "Delete Country",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Country deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Country not found"),
        (status_code = StatusCode::CONFLICT, description = "Country is still referenced"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    country: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .countries
        .delete_country(country.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
