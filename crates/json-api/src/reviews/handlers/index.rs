//! Review Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::reviews::models::Review;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// A product review.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    /// The unique identifier of the review
    pub uuid: Uuid,

    pub product_uuid: Uuid,
    pub user_uuid: Uuid,
    pub reviewer_name: String,
    pub reviewer_type: String,

    /// Star rating, 1 to 5
    pub rating: u8,

    pub review_text: String,
    pub approved: bool,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            uuid: review.uuid.into(),
            product_uuid: review.product_uuid.into(),
            user_uuid: review.user_uuid.into(),
            reviewer_name: review.reviewer_name,
            reviewer_type: review.reviewer_type,
            rating: review.rating,
            review_text: review.review_text,
            approved: review.approved,
            created_at: review.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// The product's reviews, newest first
    pub reviews: Vec<ReviewResponse>,
}

/// Review Index Handler
///
/// Returns a product's reviews, newest first. Administrators may pass
/// `include_unapproved=true` to see reviews still awaiting moderation;
/// everyone else only ever sees approved reviews.
#[endpoint(
    tags("reviews"),
    summary = "List Reviews",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    product: QueryParam<Uuid>,
    include_unapproved: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authed_user_or_401()?;

    let only_approved = !(user.is_admin && include_unapproved.into_inner().unwrap_or(false));

    let reviews = state
        .app
        .reviews
        .list_product_reviews(product.into_inner().into(), only_approved)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}
