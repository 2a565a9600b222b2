//! Test helpers.

use std::sync::Arc;

use pantry_app::{
    auth::{MockAuthService, models::AuthedUser},
    context::AppContext,
    domain::{
        bundles::MockBundlesService,
        carousel::MockCarouselService,
        categories::MockCategoriesService,
        countries::MockCountriesService,
        orders::MockOrdersService,
        products::MockProductsService,
        reports::MockReportsService,
        reviews::MockReviewsService,
        users::{MockUsersService, models::UserUuid},
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: Uuid = Uuid::nil();

pub(crate) fn test_user(is_admin: bool) -> AuthedUser {
    AuthedUser {
        uuid: UserUuid::from_uuid(TEST_USER_UUID),
        name: "Test Customer".to_string(),
        email: "customer@example.com".to_string(),
        is_admin,
    }
}

/// Every service mocked with no expectations; tests replace the ones they
/// exercise. An unexpected call on any other service panics the test.
pub(crate) struct MockApp {
    pub products: MockProductsService,
    pub categories: MockCategoriesService,
    pub countries: MockCountriesService,
    pub bundles: MockBundlesService,
    pub reviews: MockReviewsService,
    pub carousel: MockCarouselService,
    pub users: MockUsersService,
    pub orders: MockOrdersService,
    pub reports: MockReportsService,
    pub auth: MockAuthService,
}

impl MockApp {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            categories: MockCategoriesService::new(),
            countries: MockCountriesService::new(),
            bundles: MockBundlesService::new(),
            reviews: MockReviewsService::new(),
            carousel: MockCarouselService::new(),
            users: MockUsersService::new(),
            orders: MockOrdersService::new(),
            reports: MockReportsService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            countries: Arc::new(self.countries),
            bundles: Arc::new(self.bundles),
            reviews: Arc::new(self.reviews),
            carousel: Arc::new(self.carousel),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            reports: Arc::new(self.reports),
            auth: Arc::new(self.auth),
        }))
    }
}

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_authed_user(test_user(false));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_authed_user(test_user(true));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = MockApp::new();

    app.auth = auth;

    app.into_state()
}

/// A service with the route mounted behind an already-authenticated
/// customer identity.
pub(crate) fn service_as_customer(app: MockApp, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(app.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Same, but with an admin identity.
pub(crate) fn service_as_admin(app: MockApp, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(app.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}
