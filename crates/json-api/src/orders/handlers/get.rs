//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pantry::money::Currency;
use pantry_app::domain::orders::models::{Order, OrderItem, ShippingAddress};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Destination stored flat on the order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressResponse {
    pub country: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
    pub special_instructions: String,
}

impl From<ShippingAddress> for ShippingAddressResponse {
    fn from(address: ShippingAddress) -> Self {
        ShippingAddressResponse {
            country: address.country,
            city: address.city,
            address: address.address,
            postal_code: address.postal_code,
            special_instructions: address.special_instructions,
        }
    }
}

/// A line on an order, with the product's display fields joined in.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub product_brand: String,
    pub country_name: String,
    pub category_name: String,
    pub quantity: u32,

    /// Unit price captured when the line was added, in minor units
    pub price_at_purchase: u64,

    /// Quantity times the captured price, in minor units
    pub line_total: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        let line_total = item.line_total();

        OrderItemResponse {
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            product_image: item.product_image,
            product_brand: item.product_brand,
            country_name: item.country_name,
            category_name: item.category_name,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
            line_total,
        }
    }
}

/// An order, pending cart or placed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    pub user_uuid: Uuid,
    pub order_status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub shipping_address: ShippingAddressResponse,
    pub phone: String,
    pub items: Vec<OrderItemResponse>,

    /// Sum of line totals, in minor units
    pub subtotal: u64,

    pub shipping_fee: u64,
    pub tax: u64,

    /// Subtotal plus shipping and tax, in minor units
    pub total: u64,

    /// ISO 4217 alpha code
    pub currency: String,

    /// Storefront label for the shipping line, keyed off the currency
    pub shipping_label: String,

    /// Bumped on every cart mutation
    pub version: u64,

    pub date_ordered: String,
}

fn shipping_label(currency: Currency) -> &'static str {
    match currency {
        Currency::Egp => "Shipping",
        Currency::Usd => "International Shipping",
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            order_status: order.order_status.to_string(),
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            shipping_address: order.shipping_address.into(),
            phone: order.phone,
            items: order.items.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal,
            shipping_fee: order.shipping_fee,
            tax: order.tax,
            total: order.total,
            currency: order.currency.to_string(),
            shipping_label: shipping_label(order.currency).to_string(),
            version: order.version,
            date_ordered: order.date_ordered.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order. Customers only see their own orders; administrators
/// see everything.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.authed_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into(), user.uuid, user.is_admin)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pantry::lifecycle::OrderStatus;
    use pantry_app::domain::orders::{MockOrdersService, OrdersServiceError, models::OrderUuid};

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{MockApp, TEST_USER_UUID, service_as_admin, service_as_customer},
    };

    use super::*;

    #[tokio::test]
    async fn get_returns_own_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |o, caller, is_admin| {
                *o == uuid && *caller == TEST_USER_UUID.into() && !is_admin
            })
            .return_once(|o, caller, _| Ok(make_order(o, caller, OrderStatus::Processing)));

        let mut app = MockApp::new();
        app.orders = orders;

        let service = service_as_customer(app, Router::with_path("orders/{order}").get(handler));

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.order_status, "processing");
        assert_eq!(response.items[0].line_total, 15_00);
        assert_eq!(response.items[0].product_brand, "Pantry");
        assert_eq!(response.items[0].country_name, "Japan");
        assert_eq!(response.items[0].category_name, "Snacks");
        assert_eq!(response.shipping_label, "International Shipping");

        Ok(())
    }

    #[tokio::test]
    async fn egp_orders_carry_the_domestic_shipping_label() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders.expect_get_order().once().return_once(|o, caller, _| {
            let mut order = make_order(o, caller, OrderStatus::Processing);
            order.currency = Currency::Egp;

            Ok(order)
        });

        let mut app = MockApp::new();
        app.orders = orders;

        let service = service_as_customer(app, Router::with_path("orders/{order}").get(handler));

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.shipping_label, "Shipping");

        Ok(())
    }

    #[tokio::test]
    async fn admins_pass_the_admin_flag_through() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|_, _, is_admin| *is_admin)
            .return_once(|o, caller, _| Ok(make_order(o, caller, OrderStatus::Shipped)));

        let mut app = MockApp::new();
        app.orders = orders;

        let service = service_as_admin(app, Router::with_path("orders/{order}").get(handler));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn get_foreign_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::NotFound));

        let mut app = MockApp::new();
        app.orders = orders;

        let service = service_as_customer(app, Router::with_path("orders/{order}").get(handler));

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
