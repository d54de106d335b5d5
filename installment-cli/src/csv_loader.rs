//! CSV batch quoting.
//!
//! ## Input Format
//!
//! | Column | Type | Notes |
//! |---------|--------|-------------------------------------------------|
//! | `plan` | string | One of the plan identifiers, e.g. `six-months-no-down` |
//! | `price` | string | Retail price; `.` or `,` as decimal separator |
//!
//! Prices that use `,` must be quoted so the comma is not taken as a field
//! separator:
//!
//! ```csv
//! plan,price
//! nine-months-with-down,100000
//! two-months-with-down,"1000,5"
//! ```
//!
//! ## Output Format
//!
//! One row per input row, in input order, with columns
//! `plan,price,down_payment,monthly_payment,error`. A row whose price is
//! rejected keeps empty amount cells and carries the message in `error`.
use std::io::{Read, Write};
use std::path::Path;

use installment_core::{CalculationResult, Plan, calculate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Serde-compatible rows that mirror the CSV layouts exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    plan: String,
    price: String,
}

/// One line of batch output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRow {
    pub plan: Plan,
    pub price: String,
    pub down_payment: Option<Decimal>,
    pub monthly_payment: Option<Decimal>,
    pub error: Option<String>,
}

/// A plan and the raw price text to quote it with.
///
/// The price is left unparsed so that a bad value fails only its own row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub plan: Plan,
    pub price: String,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading quote requests.
#[derive(Debug, thiserror::Error)]
pub enum QuoteLoadError {
    /// The input file could not be read.
    #[error("cannot read quote file: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `plan` cell did not name a known plan. `row` is 1-based, with the
    /// header as row 0.
    #[error("unrecognised plan '{plan}' on row {row}")]
    UnknownPlan { plan: String, row: usize },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<QuoteRequest, QuoteLoadError> {
    let plan = Plan::parse(&row.plan).ok_or_else(|| QuoteLoadError::UnknownPlan {
        plan: row.plan,
        row: row_number,
    })?;

    Ok(QuoteRequest {
        plan,
        price: row.price,
    })
}

/// Reads quote requests from CSV. Rows are returned in input order.
///
/// # Errors
///
/// * [QuoteLoadError::Parse] – if the CSV is structurally invalid.
/// * [QuoteLoadError::UnknownPlan] – if any row names an unknown plan.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<QuoteRequest>, QuoteLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Parses CSV text held in memory.
pub fn load_from_str(input: &str) -> Result<Vec<QuoteRequest>, QuoteLoadError> {
    load_from_reader(input.as_bytes())
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_reader].
pub fn load_from_file(path: &Path) -> Result<Vec<QuoteRequest>, QuoteLoadError> {
    let file = std::fs::File::open(path)?;
    let requests = load_from_reader(file)?;
    info!(path = %path.display(), count = requests.len(), "loaded quote requests");
    Ok(requests)
}

// ---------------------------------------------------------------------------
// Quoting and writing
// ---------------------------------------------------------------------------

impl QuoteRow {
    fn quoted(
        request: &QuoteRequest,
        result: CalculationResult,
    ) -> Self {
        Self {
            plan: request.plan,
            price: request.price.clone(),
            down_payment: Some(result.down_payment),
            monthly_payment: Some(result.monthly_payment),
            error: None,
        }
    }

    fn rejected(
        request: &QuoteRequest,
        error: String,
    ) -> Self {
        Self {
            plan: request.plan,
            price: request.price.clone(),
            down_payment: None,
            monthly_payment: None,
            error: Some(error),
        }
    }
}

/// Quotes every request. Never fails as a whole: rejected prices are
/// reported on their own row.
pub fn quote_all(requests: &[QuoteRequest]) -> Vec<QuoteRow> {
    requests
        .iter()
        .enumerate()
        .map(|(idx, request)| match calculate(request.plan, &request.price) {
            Ok(result) => QuoteRow::quoted(request, result),
            Err(e) => {
                warn!(row = idx + 1, price = %request.price, "{}", e);
                QuoteRow::rejected(request, e.to_string())
            }
        })
        .collect()
}

/// Writes quote rows as CSV, header first.
pub fn write_quotes<W: Write>(
    writer: W,
    rows: &[QuoteRow],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
