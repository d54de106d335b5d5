use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name one of the known plans.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown plan '{0}'")]
pub struct UnknownPlanError(pub String);

/// One of the five fixed installment schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    #[default]
    NineMonthsWithDown,
    SixMonthsWithDown,
    SixMonthsNoDown,
    ThreeMonthsWithDown,
    TwoMonthsWithDown,
}

/// The arithmetic behind a plan, as one row of the formula table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanFormula {
    /// The price is marked up, a share of the new price is due upfront and
    /// the remainder is spread over `months`, rounded to tens plus `adjustment`.
    WithDownPayment {
        markup: f64,
        down_payment_rate: f64,
        months: u32,
        adjustment: f64,
    },

    /// No down payment; the marked-up price is spread over `months`,
    /// rounded to tens plus `adjustment`.
    NoDownPayment {
        markup: f64,
        months: u32,
        adjustment: f64,
    },

    /// No down payment and no markup; each month is a fixed share of the
    /// price, without rounding.
    Split { monthly_share: f64 },
}

impl Plan {
    /// Every plan, in the order they are offered to the user.
    pub const ALL: [Plan; 5] = [
        Self::NineMonthsWithDown,
        Self::SixMonthsWithDown,
        Self::SixMonthsNoDown,
        Self::ThreeMonthsWithDown,
        Self::TwoMonthsWithDown,
    ];

    /// Stable identifier used on the command line, in config files and in CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NineMonthsWithDown => "nine-months-with-down",
            Self::SixMonthsWithDown => "six-months-with-down",
            Self::SixMonthsNoDown => "six-months-no-down",
            Self::ThreeMonthsWithDown => "three-months-with-down",
            Self::TwoMonthsWithDown => "two-months-with-down",
        }
    }

    /// Looks a plan up by identifier, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(wanted))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NineMonthsWithDown => "9 months",
            Self::SixMonthsWithDown => "6 months",
            Self::SixMonthsNoDown => "6 months (no down payment)",
            Self::ThreeMonthsWithDown => "3 months",
            Self::TwoMonthsWithDown => "2 months",
        }
    }

    /// Short human-readable summary of the formula.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NineMonthsWithDown => {
                "+15% to price; down payment 25% of new price; monthly 75% / 9, rounded to tens, +10"
            }
            Self::SixMonthsWithDown => {
                "+10% to price; down payment 25% of new price; monthly 75% / 6, rounded to tens, +50"
            }
            Self::SixMonthsNoDown => "monthly (price x 1.20) / 6, rounded to tens, +50; no down payment",
            Self::ThreeMonthsWithDown => {
                "+5% to price; down payment 25% of new price; monthly 75% / 3, rounded to tens, +20"
            }
            Self::TwoMonthsWithDown => "monthly price x 0.5; no down payment",
        }
    }

    pub fn formula(&self) -> PlanFormula {
        match self {
            Self::NineMonthsWithDown => PlanFormula::WithDownPayment {
                markup: 1.15,
                down_payment_rate: 0.25,
                months: 9,
                adjustment: 10.0,
            },
            Self::SixMonthsWithDown => PlanFormula::WithDownPayment {
                markup: 1.10,
                down_payment_rate: 0.25,
                months: 6,
                adjustment: 50.0,
            },
            Self::SixMonthsNoDown => PlanFormula::NoDownPayment {
                markup: 1.20,
                months: 6,
                adjustment: 50.0,
            },
            Self::ThreeMonthsWithDown => PlanFormula::WithDownPayment {
                markup: 1.05,
                down_payment_rate: 0.25,
                months: 3,
                adjustment: 20.0,
            },
            Self::TwoMonthsWithDown => PlanFormula::Split {
                monthly_share: 0.5,
            },
        }
    }

    /// Whether the plan asks for money upfront.
    pub fn has_down_payment(&self) -> bool {
        matches!(self.formula(), PlanFormula::WithDownPayment { .. })
    }
}

impl fmt::Display for Plan {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Plan {
    type Err = UnknownPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPlanError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // identifier tests
    // =========================================================================

    #[test]
    fn parse_accepts_every_identifier() {
        for plan in Plan::ALL {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(
            Plan::parse("  Six-Months-No-Down "),
            Some(Plan::SixMonthsNoDown)
        );
    }

    #[test]
    fn parse_rejects_unknown_identifier() {
        assert_eq!(Plan::parse("twelve-months"), None);
        assert_eq!(Plan::parse(""), None);
    }

    #[test]
    fn from_str_reports_offending_input() {
        let result: Result<Plan, _> = "weekly".parse();

        assert_eq!(result, Err(UnknownPlanError("weekly".to_string())));
    }

    #[test]
    fn all_lists_five_distinct_plans() {
        let mut ids: Vec<_> = Plan::ALL.iter().map(Plan::as_str).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn default_plan_is_nine_months() {
        assert_eq!(Plan::default(), Plan::NineMonthsWithDown);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(
            Plan::SixMonthsNoDown.to_string(),
            "6 months (no down payment)"
        );
    }

    // =========================================================================
    // formula table tests
    // =========================================================================

    #[test]
    fn nine_months_formula() {
        assert_eq!(
            Plan::NineMonthsWithDown.formula(),
            PlanFormula::WithDownPayment {
                markup: 1.15,
                down_payment_rate: 0.25,
                months: 9,
                adjustment: 10.0,
            }
        );
    }

    #[test]
    fn six_months_formula() {
        assert_eq!(
            Plan::SixMonthsWithDown.formula(),
            PlanFormula::WithDownPayment {
                markup: 1.10,
                down_payment_rate: 0.25,
                months: 6,
                adjustment: 50.0,
            }
        );
    }

    #[test]
    fn three_months_formula() {
        assert_eq!(
            Plan::ThreeMonthsWithDown.formula(),
            PlanFormula::WithDownPayment {
                markup: 1.05,
                down_payment_rate: 0.25,
                months: 3,
                adjustment: 20.0,
            }
        );
    }

    #[test]
    fn six_months_no_down_formula() {
        assert_eq!(
            Plan::SixMonthsNoDown.formula(),
            PlanFormula::NoDownPayment {
                markup: 1.20,
                months: 6,
                adjustment: 50.0,
            }
        );
    }

    #[test]
    fn two_months_formula() {
        assert_eq!(
            Plan::TwoMonthsWithDown.formula(),
            PlanFormula::Split {
                monthly_share: 0.5,
            }
        );
    }

    #[test]
    fn only_marked_up_plans_with_down_payment_take_money_upfront() {
        let with_down: Vec<_> = Plan::ALL
            .into_iter()
            .filter(Plan::has_down_payment)
            .collect();

        assert_eq!(
            with_down,
            vec![
                Plan::NineMonthsWithDown,
                Plan::SixMonthsWithDown,
                Plan::ThreeMonthsWithDown,
            ]
        );
    }
}
