//! App Router

use salvo::Router;

use crate::{
    auth::middleware::{admin_required, handler as authenticated},
    bundles, carousel, carts, categories, countries, orders, products, reports, reviews,
};

/// Everything behind bearer auth. Back-office writes carry the admin guard.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(authenticated)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler))
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .post(categories::create::handler)
                        .push(
                            Router::with_path("{category}")
                                .put(categories::update::handler)
                                .delete(categories::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("countries")
                .get(countries::index::handler)
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .post(countries::create::handler)
                        .push(
                            Router::with_path("{country}")
                                .put(countries::update::handler)
                                .delete(countries::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("bundles")
                .get(bundles::index::handler)
                .push(Router::with_path("{bundle}").get(bundles::get::handler))
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .post(bundles::create::handler)
                        .push(
                            Router::with_path("{bundle}")
                                .put(bundles::update::handler)
                                .delete(bundles::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("carousel")
                .get(carousel::index::handler)
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .post(carousel::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carousel::update::handler)
                                .delete(carousel::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("reviews")
                .get(reviews::index::handler)
                .post(reviews::create::handler)
                .push(
                    Router::new().hoop(admin_required).push(
                        Router::with_path("{review}")
                            .delete(reviews::delete::handler)
                            .push(Router::with_path("approve").put(reviews::approve::handler)),
                    ),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                )
                .push(Router::with_path("checkout").post(carts::checkout::handler)),
        )
        .push(
            Router::with_path("orders")
                .push(Router::with_path("{order}").get(orders::get::handler))
                .push(
                    Router::new()
                        .hoop(admin_required)
                        .get(orders::index::handler)
                        .push(
                            Router::with_path("{order}")
                                .delete(orders::delete::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(orders::update_status::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("users/{user}/orders").get(orders::user_orders::handler),
        )
        .push(
            Router::with_path("reports")
                .hoop(admin_required)
                .push(Router::with_path("total-sales").get(reports::total_sales::handler))
                .push(Router::with_path("order-count").get(reports::order_count::handler))
                .push(Router::with_path("orders.csv").get(reports::sales_csv::handler)),
        )
}
