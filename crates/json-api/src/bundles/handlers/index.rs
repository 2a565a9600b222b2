//! Bundle Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    bundles::{errors::into_status_error, get::BundleResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BundlesResponse {
    /// The list of bundles
    pub bundles: Vec<BundleResponse>,
}

/// Bundle Index Handler
#[endpoint(
    tags("bundles"),
    summary = "List Bundles",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BundlesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let bundles = state
        .app
        .bundles
        .list_bundles()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BundlesResponse {
        bundles: bundles.into_iter().map(Into::into).collect(),
    }))
}
