//! Command implementations for the calculator front end.
//!
//! Every command writes to a caller-supplied writer so it can be driven
//! from `main` with stdout or from tests with a buffer.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use installment_core::{CalculationError, CalculationResult, Plan, breakdown, calculate, parse_price};
use tracing::{debug, info};

use crate::csv_loader;
use crate::state::CalculatorState;
use crate::utils::{money, opt_money_display};

const INTERACTIVE_HELP: &str =
    "Commands: plans | plan <id> | price <value> | calc | clear | help | quit | exit";

/// Prints the two lines of a quote.
pub fn write_result<W: Write>(
    out: &mut W,
    result: &CalculationResult,
) -> std::io::Result<()> {
    writeln!(out, "Down payment: {}", result.down_payment)?;
    writeln!(out, "Monthly payment: {}", result.monthly_payment)
}

/// Lists every plan with its identifier and formula.
pub fn write_plans<W: Write>(out: &mut W) -> std::io::Result<()> {
    for plan in Plan::ALL {
        writeln!(out, "{:<24} {}", plan.as_str(), plan.label())?;
        writeln!(out, "{:<24} {}", "", plan.description())?;
    }
    Ok(())
}

/// Quotes one price under one plan.
///
/// With `explain`, the intermediate amounts are printed as well.
pub fn run_quote<W: Write>(
    out: &mut W,
    plan_id: &str,
    raw_price: &str,
    explain: bool,
) -> Result<()> {
    let plan: Plan = plan_id.parse().map_err(CalculationError::from)?;
    let result = calculate(plan, raw_price)?;

    writeln!(out, "Plan: {}", plan.label())?;
    write_result(out, &result)?;

    if explain {
        let parts = breakdown(plan, parse_price(raw_price)?)?;
        writeln!(out, "New price: {}", opt_money_display(parts.new_price))?;
        writeln!(out, "Monthly base: {}", money(parts.monthly_base))?;
    }

    Ok(())
}

/// Quotes the same price under every plan.
pub fn run_compare<W: Write>(
    out: &mut W,
    raw_price: &str,
) -> Result<()> {
    let quotes = Plan::ALL
        .into_iter()
        .map(|plan| calculate(plan, raw_price).map(|result| (plan, result)))
        .collect::<Result<Vec<_>, _>>()?;

    writeln!(
        out,
        "{:<28} {:>14} {:>14}",
        "Plan", "Down payment", "Monthly"
    )?;
    for (plan, result) in quotes {
        writeln!(
            out,
            "{:<28} {:>14} {:>14}",
            plan.label(),
            result.down_payment.to_string(),
            result.monthly_payment.to_string()
        )?;
    }
    Ok(())
}

/// Quotes every row of a CSV file and writes the results as CSV.
pub fn run_batch<W: Write>(
    out: W,
    path: &Path,
) -> Result<()> {
    let requests = csv_loader::load_from_file(path)
        .with_context(|| format!("Failed to load quotes from: {}", path.display()))?;

    let rows = csv_loader::quote_all(&requests);
    let rejected = rows.iter().filter(|r| r.error.is_some()).count();

    csv_loader::write_quotes(out, &rows).context("Failed to write quotes")?;

    info!(quoted = rows.len() - rejected, rejected, "batch complete");
    Ok(())
}

/// Runs a line-oriented session until `quit` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    default_plan: Plan,
) -> Result<()> {
    let mut state = CalculatorState::new(default_plan);

    writeln!(out, "Installment calculator")?;
    writeln!(out, "{INTERACTIVE_HELP}")?;
    writeln!(out, "Selected plan: {}", state.selected_plan.label())?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let (command, argument) = match line.trim().split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line.trim(), ""),
        };
        debug!(command, argument, "interactive command");

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => writeln!(out, "{INTERACTIVE_HELP}")?,
            "plans" => write_plans(out)?,
            "plan" => match Plan::parse(argument) {
                Some(plan) => {
                    state.select_plan(plan);
                    writeln!(out, "Selected plan: {}", plan.label())?;
                }
                None => writeln!(out, "unknown plan '{argument}'")?,
            },
            "price" => state.set_price_input(argument),
            "calc" => match state.compute() {
                Ok(result) => write_result(out, result)?,
                Err(e) => writeln!(out, "{e}")?,
            },
            "clear" => state.clear(),
            other => writeln!(out, "unknown command '{other}'")?,
        }
    }

    Ok(())
}
