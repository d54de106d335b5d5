//! Integration tests that exercise batch quoting against on-disk fixture files.
//!
//! These complement the unit tests inside csv_loader.rs (which all use
//! inline string literals) by verifying that the full read-from-disk path
//! works end-to-end.

use std::path::{Path, PathBuf};

use installment_cli::{app, csv_loader};
use installment_core::Plan;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_file_succeeds() {
    let requests = csv_loader::load_from_file(&fixture_path("sample_quotes.csv"))
        .expect("fixture file should load without error");

    // The fixture has exactly 6 rows.
    assert_eq!(requests.len(), 6);
    assert_eq!(requests[3].plan, Plan::ThreeMonthsWithDown);
    assert_eq!(requests[3].price, "30000,00");
}

#[test]
fn test_quote_fixture_rows() {
    let requests = csv_loader::load_from_file(&fixture_path("sample_quotes.csv")).unwrap();

    let rows = csv_loader::quote_all(&requests);

    assert_eq!(rows[0].down_payment, Some(dec!(28750.00)));
    assert_eq!(rows[0].monthly_payment, Some(dec!(9590.00)));
    assert_eq!(rows[3].down_payment, Some(dec!(7875.00)));
    assert_eq!(rows[3].monthly_payment, Some(dec!(7900.00)));
    assert!(rows[5].error.is_some());
}

#[test]
fn test_batch_writes_csv_report() {
    let mut out = Vec::new();

    app::run_batch(&mut out, &fixture_path("sample_quotes.csv")).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\
plan,price,down_payment,monthly_payment,error
nine-months-with-down,100000,28750.00,9590.00,
six-months-with-down,60000,16500.00,8300.00,
six-months-no-down,90000,0.00,18050.00,
three-months-with-down,\"30000,00\",7875.00,7900.00,
two-months-with-down,50000,0.00,25000.00,
two-months-with-down,abc,,,enter a valid retail price greater than zero
"
    );
}

#[test]
fn test_unknown_plan_fixture_reports_row() {
    let err = csv_loader::load_from_file(&fixture_path("unknown_plan.csv")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "unrecognised plan 'twelve-months-with-down' on row 2"
    );
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let bad_path = Path::new("/this/path/does/not/exist.csv");

    let result = csv_loader::load_from_file(bad_path);

    assert!(matches!(result, Err(csv_loader::QuoteLoadError::Io(_))));
}
