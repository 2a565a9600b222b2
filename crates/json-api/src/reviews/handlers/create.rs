//! Create Review Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::reviews::models::{NewReview, ReviewUuid};

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Create Review Request
///
/// The review is recorded against the authenticated user; it starts
/// unapproved and becomes visible once moderated.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub product_uuid: Uuid,

    #[serde(default = "default_reviewer_type")]
    pub reviewer_type: String,

    /// Star rating, 1 to 5
    pub rating: u8,

    pub review_text: String,
}

fn default_reviewer_type() -> String {
    "customer".to_string()
}

/// Review Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewCreatedResponse {
    /// Created review UUID
    pub uuid: Uuid,
}

/// Create Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authed_user_or_401()?;
    let request = json.into_inner();

    let review = NewReview {
        uuid: ReviewUuid::new(),
        product_uuid: request.product_uuid.into(),
        user_uuid: user.uuid,
        reviewer_type: request.reviewer_type,
        rating: request.rating,
        review_text: request.review_text,
    };

    let uuid = state
        .app
        .reviews
        .create_review(review)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/reviews/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ReviewCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::reviews::{MockReviewsService, ReviewsServiceError};

    use crate::{
        reviews::handlers::tests::make_review,
        test_helpers::{MockApp, TEST_USER_UUID, service_as_customer},
    };

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        let mut app = MockApp::new();

        app.reviews = reviews;

        service_as_customer(app, Router::with_path("reviews").post(handler))
    }

    #[tokio::test]
    async fn create_records_review_for_authed_user() -> TestResult {
        let product = Uuid::now_v7();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .withf(move |new| {
                new.product_uuid == product.into()
                    && new.user_uuid == TEST_USER_UUID.into()
                    && new.rating == 5
            })
            .return_once(|new| Ok(make_review(new.uuid, new.product_uuid, new.rating)));

        let mut res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": product,
                "rating": 5,
                "review_text": "Crunchy and not too salty.",
            }))
            .send(&make_service(reviews))
            .await;

        let body: ReviewCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/reviews/{}", body.uuid).as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn create_bad_rating_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::InvalidRating));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": Uuid::now_v7(),
                "rating": 9,
                "review_text": "Crunchy and not too salty.",
            }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn create_short_text_returns_400() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_create_review()
            .once()
            .return_once(|_| Err(ReviewsServiceError::TextTooShort));

        let res = TestClient::post("http://example.com/reviews")
            .json(&json!({
                "product_uuid": Uuid::now_v7(),
                "rating": 4,
                "review_text": "ok",
            }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
