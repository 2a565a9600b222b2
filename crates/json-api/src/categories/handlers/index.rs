//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry_app::domain::categories::models::Category;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Catalog category with its aggregate stock count.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    /// The unique identifier of the category
    pub uuid: Uuid,

    pub name: String,
    pub icon: String,
    pub color: String,

    /// Units in stock across the category's products
    pub stock: u64,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            icon: category.icon,
            color: category.color,
            stock: category.stock,
            status: category.status.to_string(),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    /// The list of categories
    pub categories: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Returns all categories sorted by name.
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry_app::domain::categories::{MockCategoriesService, models::CategoryUuid};

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{MockApp, service_as_customer},
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        let mut app = MockApp::new();

        app.categories = categories;

        service_as_customer(app, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn index_returns_categories() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_list_categories()
            .once()
            .return_once(move || Ok(vec![make_category(uuid, "Snacks")]));

        let response: CategoriesResponse = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await
            .take_json()
            .await?;

        assert_eq!(response.categories.len(), 1);
        assert_eq!(response.categories[0].uuid, uuid.into_uuid());
        assert_eq!(response.categories[0].status, "Active");

        Ok(())
    }
}
