//! Carousel Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::carousel::CarouselServiceError;

pub(crate) fn into_status_error(error: CarouselServiceError) -> StatusError {
    match error {
        CarouselServiceError::AlreadyExists => {
            StatusError::conflict().brief("Carousel item already exists")
        }
        CarouselServiceError::MissingRequiredData | CarouselServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid carousel payload")
        }
        CarouselServiceError::NotFound => {
            StatusError::not_found().brief("Carousel item not found")
        }
        CarouselServiceError::Sql(source) => {
            error!("carousel query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
