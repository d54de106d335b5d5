//! Session state for the interactive calculator.
//!
//! The state belongs to the front end. Each computation hands the current
//! plan and price text to the stateless calculator and stores what comes back.

use installment_core::{CalculationError, CalculationResult, Plan, calculate};

/// What the user has entered so far and the outcome of the last calculation.
#[derive(Debug, Clone, Default)]
pub struct CalculatorState {
    pub selected_plan: Plan,
    pub price_input: String,

    /// `None` until the first calculation.
    outcome: Option<Result<CalculationResult, CalculationError>>,
}

impl CalculatorState {
    /// Create a session with `plan` preselected.
    pub fn new(plan: Plan) -> Self {
        Self {
            selected_plan: plan,
            ..Default::default()
        }
    }

    pub fn select_plan(
        &mut self,
        plan: Plan,
    ) {
        self.selected_plan = plan;
    }

    pub fn set_price_input(
        &mut self,
        input: impl Into<String>,
    ) {
        self.price_input = input.into();
    }

    /// Run the calculation for the current inputs, replacing any previous
    /// result or error.
    pub fn compute(&mut self) -> &Result<CalculationResult, CalculationError> {
        self.outcome
            .insert(calculate(self.selected_plan, &self.price_input))
    }

    /// Result of the last calculation, if it succeeded.
    pub fn result(&self) -> Option<&CalculationResult> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    /// Error from the last calculation, if it failed.
    pub fn error(&self) -> Option<&CalculationError> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err())
    }

    /// Clear inputs and outcome, keeping the selected plan.
    pub fn clear(&mut self) {
        self.price_input.clear();
        self.outcome = None;
    }
}
