//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Review already exists")
        }
        ReviewsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product or user")
        }
        ReviewsServiceError::InvalidRating => {
            StatusError::bad_request().brief("Rating must be between 1 and 5")
        }
        ReviewsServiceError::TextTooShort => {
            StatusError::bad_request().brief("Review text is too short")
        }
        ReviewsServiceError::MissingRequiredData | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::Sql(source) => {
            error!("reviews query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
