//! Total Sales Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, reports::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalSalesResponse {
    /// Sum of order totals in minor units, carts included
    pub total_sales: u64,
}

/// Total Sales Handler
#[endpoint(
    tags("reports"),
    summary = "Total Sales",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TotalSalesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let total_sales = state
        .app
        .reports
        .total_sales()
        .await
        .map_err(into_status_error)?;

    Ok(Json(TotalSalesResponse { total_sales }))
}
