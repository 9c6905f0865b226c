//! Tunables shared by the calculators.
//!
//! Every field has a default matching the behaviour of the web calculators,
//! so an empty YAML/JSON document deserialises into a usable config.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::FinCalcResult;

/// Bisection solver settings used by the rate and tenure solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute EMI tolerance in currency units.
    pub tolerance: Decimal,
    /// Hard iteration ceiling; the solver returns its best estimate after this.
    pub max_iterations: u32,
    /// Search bracket for the annual rate, in percent.
    pub rate_bracket_pct: (Decimal, Decimal),
    /// Search bracket for the tenure, in years.
    pub tenure_bracket_years: (Decimal, Decimal),
    /// Decimal places solver results are rounded to.
    pub result_decimals: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: dec!(0.01),
            max_iterations: 100,
            rate_bracket_pct: (Decimal::ZERO, dec!(100)),
            tenure_bracket_years: (Decimal::ZERO, dec!(30)),
            result_decimals: 2,
        }
    }
}

/// Chart sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Approximate number of points a sampled series is capped at.
    pub target_points: u32,
    /// Month step of the loan comparison outstanding-balance timeline.
    pub comparison_step_months: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            target_points: 12,
            comparison_step_months: 6,
        }
    }
}

/// Amortization schedule presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Rows per schedule page; the first page is the one-year preview.
    pub page_size: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { page_size: 12 }
    }
}

/// Top-level calculator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub solver: SolverConfig,
    pub chart: ChartConfig,
    pub schedule: ScheduleConfig,
}

impl CalculatorConfig {
    /// Reject settings that would make a solver or sampler meaningless.
    pub fn validate(&self) -> FinCalcResult<()> {
        let s = &self.solver;
        if s.tolerance <= Decimal::ZERO {
            return Err(invalid("solver.tolerance", "Tolerance must be positive"));
        }
        if s.max_iterations == 0 {
            return Err(invalid(
                "solver.max_iterations",
                "At least one iteration is required",
            ));
        }
        let (rate_lo, rate_hi) = s.rate_bracket_pct;
        if rate_lo < Decimal::ZERO || rate_hi <= rate_lo {
            return Err(invalid(
                "solver.rate_bracket_pct",
                "Bracket must be non-negative with low < high",
            ));
        }
        let (ten_lo, ten_hi) = s.tenure_bracket_years;
        if ten_lo < Decimal::ZERO || ten_hi <= ten_lo {
            return Err(invalid(
                "solver.tenure_bracket_years",
                "Bracket must be non-negative with low < high",
            ));
        }
        if s.result_decimals > 10 {
            return Err(invalid(
                "solver.result_decimals",
                "At most 10 decimal places are supported",
            ));
        }
        if self.chart.target_points == 0 {
            return Err(invalid("chart.target_points", "Must be at least 1"));
        }
        if self.chart.comparison_step_months == 0 {
            return Err(invalid("chart.comparison_step_months", "Must be at least 1"));
        }
        if self.schedule.page_size == 0 {
            return Err(invalid("schedule.page_size", "Must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> FinCalcError {
    FinCalcError::InvalidConfig {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CalculatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.solver.tolerance, dec!(0.01));
        assert_eq!(config.chart.target_points, 12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{"solver": {"max_iterations": 50}}"#).unwrap();
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.rate_bracket_pct, (Decimal::ZERO, dec!(100)));
        assert_eq!(config.schedule.page_size, 12);
    }

    #[test]
    fn test_inverted_bracket_rejected() {
        let mut config = CalculatorConfig::default();
        config.solver.tenure_bracket_years = (dec!(30), dec!(1));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, FinCalcError::InvalidConfig { .. }));
    }

    #[test]
    fn test_zero_tolerance_rejected() {
        let mut config = CalculatorConfig::default();
        config.solver.tolerance = Decimal::ZERO;
        assert!(config.validate().is_err());
    }
}
