//! Update Category Handler

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

use pantry_app::domain::categories::models::CategoryUpdate;

use crate::{
    categories::errors::into_status_error,
    categories::{create::parse_status, index::CategoryResponse},
    extensions::*,
    state::State,
};

/// Update Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    pub name: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    #[serde(default)]
    pub stock: u64,

    pub status: Option<String>,
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let update = CategoryUpdate {
        name: request.name,
        icon: request.icon,
        color: request.color,
        stock: request.stock,
        status: parse_status(request.status)?,
    };

    let updated = state
        .app
        .categories
        .update_category(category.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pantry_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, models::CategoryUuid,
    };

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{MockApp, service_as_admin},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        let mut app = MockApp::new();

        app.categories = categories;

        service_as_admin(app, Router::with_path("categories/{category}").put(handler))
    }

    #[tokio::test]
    async fn update_returns_updated_category() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .withf(move |u, update| *u == uuid && update.name == "Sweets")
            .return_once(move |u, _| Ok(make_category(u, "Sweets")));

        let response: CategoryResponse =
            TestClient::put(format!("http://example.com/categories/{uuid}"))
                .json(&json!({ "name": "Sweets", "icon": "candy", "color": "#ffb703" }))
                .send(&make_service(categories))
                .await
                .take_json()
                .await?;

        assert_eq!(response.name, "Sweets");

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_update_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/categories/{uuid}"))
            .json(&json!({ "name": "Sweets" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
