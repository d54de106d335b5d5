use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::amount_to_cents;

/// Down payment and monthly installment for one quote, in whole cents.
///
/// Both amounts always carry exactly two fractional digits, so `Display`
/// renders them as `28750.00` regardless of the caller's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub down_payment: Decimal,
    pub monthly_payment: Decimal,
}

impl CalculationResult {
    /// Builds a result from computed amounts, rounding both half away from
    /// zero to cents.
    ///
    /// Returns `None` if either amount is not finite or is too large to carry
    /// two fractional digits.
    pub fn from_amounts(
        down_payment: f64,
        monthly_payment: f64,
    ) -> Option<Self> {
        Some(Self {
            down_payment: amount_to_cents(down_payment)?,
            monthly_payment: amount_to_cents(monthly_payment)?,
        })
    }

    pub fn from_breakdown(breakdown: &PaymentBreakdown) -> Option<Self> {
        Self::from_amounts(breakdown.down_payment, breakdown.monthly_payment)
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "down payment {}, monthly payment {}",
            self.down_payment, self.monthly_payment
        )
    }
}

/// Intermediate values of a calculation, before rounding to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Price after the plan's markup; `None` for plans that never compute one.
    pub new_price: Option<f64>,
    pub down_payment: f64,
    /// Monthly amount before rounding to tens and adding the plan adjustment.
    pub monthly_base: f64,
    pub monthly_payment: f64,
}
