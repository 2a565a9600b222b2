//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry::catalog::EntityStatus;
use pantry_app::domain::categories::models::{CategoryUuid, NewCategory};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    pub status: Option<String>,
}

/// Category Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryCreatedResponse {
    /// Created category UUID
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

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let category = NewCategory {
        uuid: CategoryUuid::new(),
        name: request.name,
        icon: request.icon,
        color: request.color,
        stock: 0,
        status: parse_status(request.status)?,
    };

    let uuid = state
        .app
        .categories
        .create_category(category)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/categories/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CategoryCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        let mut app = MockApp::new();

        app.categories = categories;

        service_as_admin(app, Router::with_path("categories").post(handler))
    }

    #[tokio::test]
    async fn create_returns_201_with_location() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|new| {
                new.name == "Dried Fruit" && new.stock == 0 && new.status == EntityStatus::Active
            })
            .return_once(|new| Ok(make_category(new.uuid, "Dried Fruit")));

        let mut res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Dried Fruit", "icon": "raisin", "color": "#e76f51" }))
            .send(&make_service(categories))
            .await;

        let body: CategoryCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/categories/{}", body.uuid).as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn create_unknown_status_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Dried Fruit", "status": "Archived" }))
            .send(&make_service(MockCategoriesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn create_duplicate_name_returns_409() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "name": "Snacks" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
