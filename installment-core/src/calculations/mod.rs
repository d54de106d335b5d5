//! Installment calculations.
//!
//! This module provides the price validation, rounding primitives and plan
//! formulas behind every quote.

pub mod common;
pub mod pricing;

pub use pricing::{CalculationError, breakdown, calculate, calculate_for_plan_id, parse_price};
