//! Installment pricing for the five payment plans.
//!
//! # Formula Table
//!
//! | Plan | New price | Down payment | Monthly base | Monthly payment |
//! |------|-----------|--------------|--------------|-----------------|
//! | 9 months | price × 1.15 | new × 0.25 | (new × 0.75) / 9 | tens(base) + 10 |
//! | 6 months | price × 1.10 | new × 0.25 | (new × 0.75) / 6 | tens(base) + 50 |
//! | 3 months | price × 1.05 | new × 0.25 | (new × 0.75) / 3 | tens(base) + 20 |
//! | 6 months, no down payment | — | 0 | (price × 1.20) / 6 | tens(base) + 50 |
//! | 2 months | — | 0 | — | price × 0.5 |
//!
//! `tens` is [`round_to_tens`]. The arithmetic runs in `f64`; only the
//! final amounts are converted to [`Decimal`](rust_decimal::Decimal) and
//! rounded to cents.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use installment_core::{Plan, calculate};
//!
//! let result = calculate(Plan::NineMonthsWithDown, "100000").unwrap();
//!
//! assert_eq!(result.down_payment, dec!(28750.00));
//! assert_eq!(result.monthly_payment, dec!(9590.00));
//! assert_eq!(result.to_string(), "down payment 28750.00, monthly payment 9590.00");
//! ```

use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_to_tens;
use crate::models::{CalculationResult, PaymentBreakdown, Plan, PlanFormula, UnknownPlanError};

/// Errors that can occur while pricing an installment plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The price is not a number, is not greater than zero, or is too large
    /// to quote in cents.
    #[error("enter a valid retail price greater than zero")]
    InvalidPrice { input: String },

    /// The plan identifier does not name one of the known plans.
    #[error(transparent)]
    UnknownPlan(#[from] UnknownPlanError),
}

impl CalculationError {
    fn invalid_price(input: &str) -> Self {
        Self::InvalidPrice {
            input: input.to_string(),
        }
    }
}

/// Normalizes price input: trims whitespace and treats `,` as the decimal point.
fn normalize_price_input(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// Parses a retail price entered by the user.
///
/// Accepts `.` or `,` as the decimal separator and plain or scientific
/// notation. The price must be finite and strictly greater than zero.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidPrice`] if the input is empty, is not
/// a number, is infinite or NaN, or is zero or negative.
///
/// # Example
///
/// ```
/// use installment_core::parse_price;
///
/// assert_eq!(parse_price("1000,5").unwrap(), 1000.5);
/// assert!(parse_price("0").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<f64, CalculationError> {
    let normalized = normalize_price_input(raw);

    let price = normalized.parse::<f64>().map_err(|e| {
        debug!(input = %raw, "invalid price: {}", e);
        CalculationError::invalid_price(raw)
    })?;

    if !price.is_finite() || price <= 0.0 {
        debug!(input = %raw, price, "price must be finite and greater than zero");
        return Err(CalculationError::invalid_price(raw));
    }

    Ok(price)
}

/// Applies a plan's formula to an already validated price.
///
/// Amounts are not rounded to cents; use [`calculate`] for display values.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidPrice`] if an amount overflows to
/// infinity.
pub fn breakdown(
    plan: Plan,
    price: f64,
) -> Result<PaymentBreakdown, CalculationError> {
    let breakdown = match plan.formula() {
        PlanFormula::WithDownPayment {
            markup,
            down_payment_rate,
            months,
            adjustment,
        } => {
            let new_price = price * markup;
            let monthly_base = (new_price * (1.0 - down_payment_rate)) / f64::from(months);

            PaymentBreakdown {
                new_price: Some(new_price),
                down_payment: new_price * down_payment_rate,
                monthly_base,
                monthly_payment: round_to_tens(monthly_base) + adjustment,
            }
        }
        PlanFormula::NoDownPayment {
            markup,
            months,
            adjustment,
        } => {
            let monthly_base = (price * markup) / f64::from(months);

            PaymentBreakdown {
                new_price: None,
                down_payment: 0.0,
                monthly_base,
                monthly_payment: round_to_tens(monthly_base) + adjustment,
            }
        }
        PlanFormula::Split { monthly_share } => {
            let monthly_payment = price * monthly_share;

            PaymentBreakdown {
                new_price: None,
                down_payment: 0.0,
                monthly_base: monthly_payment,
                monthly_payment,
            }
        }
    };

    if !(breakdown.down_payment.is_finite() && breakdown.monthly_payment.is_finite()) {
        debug!(plan = plan.as_str(), price, "amounts overflowed");
        return Err(CalculationError::invalid_price(&price.to_string()));
    }

    Ok(breakdown)
}

/// Calculates the down payment and monthly installment for a plan.
///
/// This is the main entry point: it validates the raw price, applies the
/// plan's formula and rounds both amounts to cents.
///
/// # Errors
///
/// Returns [`CalculationError::InvalidPrice`] if the price cannot be parsed
/// as a number greater than zero, or if the resulting amounts are too large
/// to carry two fractional digits.
pub fn calculate(
    plan: Plan,
    raw_price: &str,
) -> Result<CalculationResult, CalculationError> {
    let price = parse_price(raw_price)?;
    let parts = breakdown(plan, price).map_err(|_| CalculationError::invalid_price(raw_price))?;
    let result = CalculationResult::from_breakdown(&parts).ok_or_else(|| {
        debug!(plan = plan.as_str(), price, "amounts out of range for cents");
        CalculationError::invalid_price(raw_price)
    })?;

    debug!(
        plan = plan.as_str(),
        price,
        down_payment = %result.down_payment,
        monthly_payment = %result.monthly_payment,
        "calculated installment"
    );

    Ok(result)
}

/// Like [`calculate`], but takes the plan by identifier.
///
/// # Errors
///
/// Returns [`CalculationError::UnknownPlan`] if `plan_id` does not name a
/// plan, otherwise the same errors as [`calculate`].
pub fn calculate_for_plan_id(
    plan_id: &str,
    raw_price: &str,
) -> Result<CalculationResult, CalculationError> {
    let plan: Plan = plan_id.parse()?;
    calculate(plan, raw_price)
}
