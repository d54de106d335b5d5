//! Rounding primitives shared by the plan formulas.
//!
//! Plan arithmetic runs in `f64`. Installments are rounded to tens with
//! ties going to the even multiple; final amounts cross over to [`Decimal`]
//! through their shortest round-trip form and are rounded to cents half
//! away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use installment_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a value to the nearest multiple of ten.
///
/// Computed as `round(value / 10) * 10`. Exact midpoints go to the even
/// multiple of ten, so 25 becomes 20 and 35 becomes 40.
///
/// # Examples
///
/// ```
/// use installment_core::calculations::common::round_to_tens;
///
/// assert_eq!(round_to_tens(9583.33), 9580.0);
/// assert_eq!(round_to_tens(25.0), 20.0);
/// assert_eq!(round_to_tens(35.0), 40.0);
/// ```
pub fn round_to_tens(value: f64) -> f64 {
    (value / 10.0).round_ties_even() * 10.0
}

/// Converts a computed amount to [`Decimal`] through its shortest
/// round-trip representation.
///
/// `0.575_f64` becomes `0.575`, not its binary expansion `0.57499999...`.
/// Returns `None` for non-finite values and values outside `Decimal`'s range.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    value.to_string().parse().ok()
}

/// Rounds half-up to cents and pins the scale at two digits.
///
/// The fixed scale makes `Display` print `0.00` and `25000.00` rather than
/// `0` and `25000.0`. Returns `None` when the value has too many integer
/// digits to carry two fractional ones.
pub fn to_cents(value: Decimal) -> Option<Decimal> {
    let mut cents = round_half_up(value);
    cents.rescale(2);
    (cents.scale() == 2).then_some(cents)
}

/// [`to_decimal`] followed by [`to_cents`].
pub fn amount_to_cents(value: f64) -> Option<Decimal> {
    to_cents(to_decimal(value)?)
}
