//! Checkout pricing policy.
//!
//! Pure computation of an order's totals from its line items and the
//! destination country. Shipping to Egypt uses a fixed domestic rate and
//! denominates the order in EGP; everywhere else pays an international
//! base rate plus a per-line surcharge in USD. A flat fee percentage is
//! applied to the subtotal regardless of destination.
//!
//! The policy is re-run on every cart mutation with the cart's stored
//! shipping country, and again authoritatively at checkout with the
//! country submitted in the checkout request.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Currency;

/// Fixed shipping rate for domestic (Egypt) orders, in piastres.
pub const DOMESTIC_SHIPPING_MINOR: u64 = 25_00;

/// Base international shipping rate, in cents.
pub const INTERNATIONAL_BASE_SHIPPING_MINOR: u64 = 15_00;

/// Per-line-item surcharge added to international shipping, in cents.
pub const INTERNATIONAL_PER_LINE_SURCHARGE_MINOR: u64 = 2_50;

/// Flat fee percentage applied to every subtotal.
const FEES_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2); // 0.15

/// One priced order line, as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteLine {
    /// Unit price in minor units.
    pub unit_price: u64,
    /// Quantity, at least 1.
    pub quantity: u32,
}

/// Computed totals for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Sum of unit price × quantity over all lines, in minor units.
    pub subtotal: u64,
    /// Shipping fee in minor units.
    pub shipping_fee: u64,
    /// Flat-rate fees on the subtotal, in minor units.
    pub tax: u64,
    /// `subtotal + shipping_fee + tax`.
    pub total: u64,
    /// Currency the order is denominated in.
    pub currency: Currency,
}

/// Errors from the pricing computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// A line or total exceeded the representable amount range.
    #[error("order totals overflow the representable amount range")]
    Overflow,
}

/// Whether the destination country gets the domestic rate.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[must_use]
pub fn is_domestic(destination_country: &str) -> bool {
    destination_country.trim().eq_ignore_ascii_case("egypt")
}

/// Price an order.
///
/// # Errors
///
/// Returns [`QuoteError::Overflow`] if any intermediate amount exceeds
/// `u64` minor units.
pub fn quote(lines: &[QuoteLine], destination_country: &str) -> Result<Quote, QuoteError> {
    let mut subtotal: u64 = 0;

    for line in lines {
        let line_total = line
            .unit_price
            .checked_mul(u64::from(line.quantity))
            .ok_or(QuoteError::Overflow)?;

        subtotal = subtotal.checked_add(line_total).ok_or(QuoteError::Overflow)?;
    }

    let (shipping_fee, currency) = if is_domestic(destination_country) {
        (DOMESTIC_SHIPPING_MINOR, Currency::Egp)
    } else {
        let surcharge = INTERNATIONAL_PER_LINE_SURCHARGE_MINOR
            .checked_mul(lines.len() as u64)
            .ok_or(QuoteError::Overflow)?;

        (
            INTERNATIONAL_BASE_SHIPPING_MINOR
                .checked_add(surcharge)
                .ok_or(QuoteError::Overflow)?,
            Currency::Usd,
        )
    };

    let tax = (Decimal::from(subtotal) * FEES_RATE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(QuoteError::Overflow)?;

    let total = subtotal
        .checked_add(shipping_fee)
        .and_then(|sum| sum.checked_add(tax))
        .ok_or(QuoteError::Overflow)?;

    Ok(Quote {
        subtotal,
        shipping_fee,
        tax,
        total,
        currency,
    })
}
