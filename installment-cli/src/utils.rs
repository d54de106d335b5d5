use installment_core::calculations::common::amount_to_cents;

/// Formats an amount with exactly two fractional digits.
pub fn money(value: f64) -> String {
    amount_to_cents(value).map_or_else(|| format!("{value:.2}"), |cents| cents.to_string())
}

/// Formats an optional amount for display, using "—" when `None`.
pub fn opt_money_display(d: Option<f64>) -> String {
    d.map(money).unwrap_or_else(|| "—".to_string())
}
