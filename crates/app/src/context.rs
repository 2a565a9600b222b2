//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        bundles::{BundlesService, PgBundlesService},
        carousel::{CarouselService, PgCarouselService},
        categories::{CategoriesService, PgCategoriesService},
        countries::{CountriesService, PgCountriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reports::{PgReportsService, ReportsService},
        reviews::{PgReviewsService, ReviewsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// The full service surface, behind trait objects so handlers can be
/// tested against mocks.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub countries: Arc<dyn CountriesService>,
    pub bundles: Arc<dyn BundlesService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub carousel: Arc<dyn CarouselService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,
    pub reports: Arc<dyn ReportsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            countries: Arc::new(PgCountriesService::new(db.clone())),
            bundles: Arc::new(PgBundlesService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            carousel: Arc::new(PgCarouselService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reports: Arc::new(PgReportsService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db)),
        })
    }
}
