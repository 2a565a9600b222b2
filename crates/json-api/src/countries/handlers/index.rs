//! Country Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::countries::models::Country;

use crate::{countries::errors::into_status_error, extensions::*, state::State};

/// Country of origin with its aggregate stock count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountryResponse {
    /// The unique identifier of the country
    pub uuid: Uuid,

    pub name: String,

    /// ISO 3166-1 alpha-2 code
    pub code: String,

    pub flag_image: String,
    pub description: String,

    /// Units in stock across the country's products
    pub stock: u64,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        CountryResponse {
            uuid: country.uuid.into(),
            name: country.name,
            code: country.code,
            flag_image: country.flag_image,
            description: country.description,
            stock: country.stock,
            status: country.status.to_string(),
            created_at: country.created_at.to_string(),
            updated_at: country.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountriesResponse {
    /// The list of countries
    pub countries: Vec<CountryResponse>,
}

/// Country Index Handler
///
/// Returns all countries sorted by name.
#[endpoint(
    tags("countries"),
    summary = "List Countries",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CountriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let countries = state
        .app
        .countries
        .list_countries()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CountriesResponse {
        countries: countries.into_iter().map(Into::into).collect(),
    }))
}
