//! Order Models

use jiff::Timestamp;
use pantry::{
    lifecycle::{OrderStatus, PaymentMethod, PaymentStatus},
    money::Currency,
};

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Destination stored flat on the order row.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingAddress {
    pub country: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
    pub special_instructions: String,
}

impl ShippingAddress {
    /// The address a lazily created cart carries until checkout.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            country: "Temporary".to_string(),
            city: "Temporary".to_string(),
            address: "Temporary Address".to_string(),
            postal_code: "00000".to_string(),
            special_instructions: String::new(),
        }
    }

    /// A checkout submission must fill every field except the instructions.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ![&self.country, &self.city, &self.address, &self.postal_code]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

/// Phone number a lazily created cart carries until checkout.
pub const PLACEHOLDER_PHONE: &str = "1234567890";

/// A line on an order, with its product's display fields joined in:
/// name, image and brand from the product row, plus the names of its
/// country and category.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: String,
    pub product_brand: String,
    pub country_name: String,
    pub category_name: String,
    pub quantity: u32,
    pub price_at_purchase: u64,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price_at_purchase.saturating_mul(u64::from(self.quantity))
    }
}

/// Order Model
///
/// `version` is bumped on every cart mutation and doubles as a weak etag.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub order_status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub shipping_address: ShippingAddress,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub tax: u64,
    pub total: u64,
    pub currency: Currency,
    pub version: u64,
    pub date_ordered: Timestamp,
}

/// Checkout submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
    pub phone: String,
    pub payment_method: PaymentMethod,
}
