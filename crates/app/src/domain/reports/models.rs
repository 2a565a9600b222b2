//! Reporting Models

use jiff::Timestamp;
use pantry::{
    lifecycle::{OrderStatus, PaymentStatus},
    money::Currency,
};

use crate::domain::orders::models::OrderUuid;

/// One exported sales line: an order line item with its order-level
/// fields repeated alongside.
#[derive(Debug, Clone)]
pub struct SalesRow {
    pub order_uuid: OrderUuid,
    pub date_ordered: Timestamp,
    pub customer_name: String,
    pub customer_email: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub currency: Currency,
    pub product_name: String,
    pub quantity: u32,
    pub price_at_purchase: u64,
    pub order_total: u64,
}

impl SalesRow {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price_at_purchase.saturating_mul(u64::from(self.quantity))
    }
}
