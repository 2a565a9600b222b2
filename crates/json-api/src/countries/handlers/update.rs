//! Update Country Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::countries::models::CountryUpdate;

use crate::{
    countries::errors::into_status_error,
    countries::{create::parse_status, index::CountryResponse},
    extensions::*,
    state::State,
};

/// Update Country Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCountryRequest {
    pub name: String,

    /// ISO 3166-1 alpha-2 code
    pub code: String,

    #[serde(default)]
    pub flag_image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub stock: u64,

    pub status: Option<String>,
}

/// Update Country Handler
#[endpoint(
    tags("countries"),
    summary = "Update Country",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Country updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Country not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    country: PathParam<Uuid>,
    json: JsonBody<UpdateCountryRequest>,
    depot: &mut Depot,
) -> Result<Json<CountryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let update = CountryUpdate {
        name: request.name,
        code: request.code,
        flag_image: request.flag_image,
        description: request.description,
        stock: request.stock,
        status: parse_status(request.status)?,
    };

    let updated = state
        .app
        .countries
        .update_country(country.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::countries::{
        CountriesServiceError, MockCountriesService, models::CountryUuid,
    };

    use crate::{
        countries::handlers::tests::make_country,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    fn make_service(countries: MockCountriesService) -> Service {
        let mut app = MockApp::new();

        app.countries = countries;

        service_as_admin(app, Router::with_path("countries/{country}").put(handler))
    }

    #[tokio::test]
    async fn update_returns_updated_country() -> TestResult {
        let uuid = CountryUuid::new();

        let mut countries = MockCountriesService::new();

        countries
            .expect_update_country()
            .once()
            .withf(move |u, update| *u == uuid && update.code == "EG")
            .return_once(move |u, _| Ok(make_country(u, "Egypt", "EG")));

        let response: CountryResponse =
            TestClient::put(format!("http://example.com/countries/{uuid}"))
                .json(&json!({ "name": "Egypt", "code": "EG" }))
                .send(&make_service(countries))
                .await
                .take_json()
                .await?;

        assert_eq!(response.code, "EG");

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_country_returns_404() -> TestResult {
        let uuid = CountryUuid::new();

        let mut countries = MockCountriesService::new();

        countries
            .expect_update_country()
            .once()
            .return_once(|_, _| Err(CountriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/countries/{uuid}"))
            .json(&json!({ "name": "Egypt", "code": "EG" }))
            .send(&make_service(countries))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
