pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, breakdown, calculate, calculate_for_plan_id, parse_price};
pub use models::*;
