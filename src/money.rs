//! Currencies and minor-unit amounts.
//!
//! All monetary amounts in the system are integer minor units (cents for
//! USD, piastres for EGP). Two-decimal rounding in the pricing policy
//! therefore means rounding to a whole minor unit.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currencies an order can be denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar.
    Usd,
    /// Egyptian pound.
    Egp,
}

impl Currency {
    /// ISO 4217 alpha code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Egp => "EGP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a currency code is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised currency: {0}")]
pub struct ParseCurrencyError(pub String);

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USD" => Ok(Self::Usd),
            "EGP" => Ok(Self::Egp),
            other => Err(ParseCurrencyError(other.to_string())),
        }
    }
}

/// Render a minor-unit amount with two decimal places, e.g. `2500` → `"25.00"`.
#[must_use]
pub fn format_minor(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}
