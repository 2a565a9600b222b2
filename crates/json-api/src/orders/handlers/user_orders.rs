//! User Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, index::OrdersResponse},
    state::State,
};

/// User Orders Handler
///
/// A user's placed orders, newest first. The pending cart is not part of
/// the history. Customers may only read their own history.
#[endpoint(
    tags("orders"),
    summary = "List a User's Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.authed_user_or_401()?;

    let user = user.into_inner();

    if !caller.is_admin && caller.uuid.into_uuid() != user {
        return Err(StatusError::forbidden().brief("You may only list your own orders"));
    }

    let orders = state
        .app
        .orders
        .user_orders(user.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
