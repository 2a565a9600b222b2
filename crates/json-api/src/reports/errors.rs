//! Report Errors

use salvo::http::StatusError;
use tracing::error;

use pantry_app::domain::reports::ReportsServiceError;

pub(crate) fn into_status_error(error: ReportsServiceError) -> StatusError {
    match error {
        ReportsServiceError::Sql(source) => {
            error!("reports query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
