//! Bundle Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::bundles::BundlesServiceError;

pub(crate) fn into_status_error(error: BundlesServiceError) -> StatusError {
    match error {
        BundlesServiceError::AlreadyExists => StatusError::conflict().brief("Bundle already exists"),
        BundlesServiceError::UnknownProduct => {
            StatusError::bad_request().brief("Bundle references an unknown product")
        }
        BundlesServiceError::MissingRequiredData | BundlesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid bundle payload")
        }
        BundlesServiceError::NotFound => StatusError::not_found().brief("Bundle not found"),
        BundlesServiceError::Sql(source) => {
            error!("bundles query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
