//! Price quote value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Non-negative monetary amount quoted for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceQuote(Decimal);

impl PriceQuote {
    /// Creates a price quote, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// - `NegativeAmount` if `amount < 0`
    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::negative_amount(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Returns a zero price quote.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the inner decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
