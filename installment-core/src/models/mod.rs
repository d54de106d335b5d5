mod calculation_result;
mod plan;

pub use calculation_result::{CalculationResult, PaymentBreakdown};
pub use plan::{Plan, PlanFormula, UnknownPlanError};
