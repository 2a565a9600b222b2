//! Create Country Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry::catalog::EntityStatus;
use pantry_app::domain::countries::models::{CountryUuid, NewCountry};

use crate::{countries::errors::into_status_error, extensions::*, state::State};

/// Create Country Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCountryRequest {
    pub name: String,

    /// ISO 3166-1 alpha-2 code
    pub code: String,

    #[serde(default)]
    pub flag_image: String,

    #[serde(default)]
    pub description: String,

    pub status: Option<String>,
}

/// Country Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountryCreatedResponse {
    /// Created country UUID
    pub uuid: Uuid,
}

pub(super) fn parse_status(status: Option<String>) -> Result<EntityStatus, StatusError> {
    match status {
        None => Ok(EntityStatus::Active),
        Some(value) => value
            .parse()
            .map_err(|_| StatusError::bad_request().brief("Unknown status")),
    }
}

/// Create Country Handler
#[endpoint(
    tags("countries"),
    summary = "Create Country",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Country created"),
        (status_code = StatusCode::CONFLICT, description = "Country already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCountryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CountryCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let country = NewCountry {
        uuid: CountryUuid::new(),
        name: request.name,
        code: request.code,
        flag_image: request.flag_image,
        description: request.description,
        stock: 0,
        status: parse_status(request.status)?,
    };

    let uuid = state
        .app
        .countries
        .create_country(country)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/countries/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CountryCreatedResponse { uuid: uuid.into() }))
}
