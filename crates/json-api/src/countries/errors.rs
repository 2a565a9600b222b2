//! Country Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::countries::CountriesServiceError;

pub(crate) fn into_status_error(error: CountriesServiceError) -> StatusError {
    match error {
        CountriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Country already exists")
        }
        CountriesServiceError::InUse => {
            StatusError::conflict().brief("Country is referenced by existing products")
        }
        CountriesServiceError::MissingRequiredData | CountriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid country payload")
        }
        CountriesServiceError::NotFound => StatusError::not_found().brief("Country not found"),
        CountriesServiceError::Sql(source) => {
            error!("countries query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
