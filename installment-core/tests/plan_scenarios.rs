//! End-to-end quotes through the public API, one per plan, using the
//! figures a sales clerk would check by hand.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use installment_core::{CalculationError, Plan, breakdown, calculate, calculate_for_plan_id};

#[test]
fn nine_months_with_down_payment() {
    let result = calculate(Plan::NineMonthsWithDown, "100000").unwrap();

    assert_eq!(result.down_payment, dec!(28750.00));
    assert_eq!(result.monthly_payment, dec!(9590.00));
}

#[test]
fn six_months_with_down_payment() {
    let result = calculate(Plan::SixMonthsWithDown, "60000").unwrap();

    assert_eq!(result.down_payment, dec!(16500.00));
    assert_eq!(result.monthly_payment, dec!(8300.00));
}

#[test]
fn six_months_without_down_payment() {
    let result = calculate(Plan::SixMonthsNoDown, "90000").unwrap();

    assert_eq!(result.down_payment, dec!(0.00));
    assert_eq!(result.monthly_payment, dec!(18050.00));
}

#[test]
fn three_months_with_down_payment() {
    let result = calculate(Plan::ThreeMonthsWithDown, "30000").unwrap();

    assert_eq!(result.down_payment, dec!(7875.00));
    assert_eq!(result.monthly_payment, dec!(7900.00));
}

#[test]
fn two_months() {
    let result = calculate(Plan::TwoMonthsWithDown, "50000").unwrap();

    assert_eq!(result.down_payment, dec!(0.00));
    assert_eq!(result.monthly_payment, dec!(25000.00));
}

#[test]
fn round_prices_on_the_default_plan() {
    // Marking up by 1.15 in binary leaves these monthly bases just under a
    // multiple of five, so they round down to the lower ten.
    let cases = [
        ("6000", dec!(1725.00), dec!(580.00)),
        ("54000", dec!(15525.00), dec!(5180.00)),
        ("102000", dec!(29325.00), dec!(9780.00)),
    ];

    for (price, down_payment, monthly_payment) in cases {
        let result = calculate(Plan::default(), price).unwrap();

        assert_eq!(result.down_payment, down_payment, "price {price}");
        assert_eq!(result.monthly_payment, monthly_payment, "price {price}");
    }
}

#[test]
fn out_of_range_prices_are_rejected_by_every_plan() {
    for plan in Plan::ALL {
        let result = calculate(plan, "79228162514264337593543950335");

        assert!(
            matches!(result, Err(CalculationError::InvalidPrice { .. })),
            "{plan:?}"
        );
    }
}

#[test]
fn zero_and_text_prices_are_rejected_for_every_plan() {
    for plan in Plan::ALL {
        for input in ["0", "abc"] {
            let result = calculate(plan, input);

            assert!(
                matches!(result, Err(CalculationError::InvalidPrice { .. })),
                "{plan:?} accepted {input:?}"
            );
        }
    }
}

#[test]
fn comma_and_dot_prices_quote_the_same() {
    for plan in Plan::ALL {
        assert_eq!(calculate(plan, "45990.50"), calculate(plan, "45990,50"));
    }
}

#[test]
fn breakdown_exposes_new_price_only_for_marked_up_plans() {
    for plan in Plan::ALL {
        let parts = breakdown(plan, 100000.0).unwrap();

        assert_eq!(parts.new_price.is_some(), plan.has_down_payment(), "{plan:?}");
        if !plan.has_down_payment() {
            assert_eq!(parts.down_payment, 0.0, "{plan:?}");
        }
    }
}

#[test]
fn plan_identifiers_round_trip_through_calculate_for_plan_id() {
    for plan in Plan::ALL {
        assert_eq!(
            calculate_for_plan_id(plan.as_str(), "12345,67"),
            calculate(plan, "12345.67")
        );
    }
}

#[test]
fn errors_render_user_facing_messages() {
    let price_error = calculate(Plan::TwoMonthsWithDown, "-5").unwrap_err();
    let plan_error = calculate_for_plan_id("quarterly", "100").unwrap_err();

    assert_eq!(
        price_error.to_string(),
        "enter a valid retail price greater than zero"
    );
    assert_eq!(plan_error.to_string(), "unknown plan 'quarterly'");
}
