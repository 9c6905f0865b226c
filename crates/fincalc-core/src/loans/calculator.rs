//! Single entry point over the four loan calculators (EMI, loan amount,
//! interest rate, tenure). Fix three of {principal, EMI, rate, tenure} and
//! solve for the fourth.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::bisection::BisectionOutcome;
use crate::config::CalculatorConfig;
use crate::error::FinCalcError;
use crate::loans::amortization::{
    build_amortization_schedule, emi_chart_series, schedule_page, SchedulePage,
};
use crate::loans::emi::{compute_emi, loan_amount_from_emi, solve_rate, solve_tenure};
use crate::loans::LoanTerms;
use crate::time_value::{months_in, round_to};
use crate::types::*;
use crate::FinCalcResult;

/// Which quantity is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveFor {
    #[default]
    Emi,
    LoanAmount,
    InterestRate,
    Tenure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCalculatorInput {
    #[serde(default)]
    pub solve_for: SolveFor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate_pct: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure_years: Option<Years>,
}

/// Whole years and leftover months of a fractional tenure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureBreakdown {
    pub years: u32,
    pub months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCalculatorOutput {
    pub solve_for: SolveFor,
    pub solved_value: Decimal,
    pub terms: LoanTerms,
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure_breakdown: Option<TenureBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<BisectionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_preview: Option<SchedulePage>,
    pub chart: Vec<ChartPoint>,
}

/// Split a fractional tenure into years and rounded months.
pub fn tenure_breakdown(tenure_years: Years) -> TenureBreakdown {
    if tenure_years <= Decimal::ZERO {
        return TenureBreakdown {
            years: 0,
            months: 0,
        };
    }
    let whole = tenure_years.floor();
    let mut years = whole.to_u32().unwrap_or(0);
    let mut months = round_to((tenure_years - whole) * dec!(12), 0)
        .to_u32()
        .unwrap_or(0);
    if months == 12 {
        years += 1;
        months = 0;
    }
    TenureBreakdown { years, months }
}

fn require(value: Option<Decimal>, field: &str) -> FinCalcResult<Decimal> {
    value.ok_or_else(|| FinCalcError::InvalidInput {
        field: field.into(),
        reason: "Required for this calculation".into(),
    })
}

/// Solve for the unknown loan quantity and report totals.
///
/// Totals follow the calculators: `total_payment = EMI × tenure × 12` and
/// `total_interest = total_payment − principal`.
pub fn calculate_loan(
    input: &LoanCalculatorInput,
    config: &CalculatorConfig,
) -> FinCalcResult<ComputationOutput<LoanCalculatorOutput>> {
    let start = Instant::now();
    config.validate()?;
    let solver_cfg = &config.solver;
    let mut warnings: Vec<String> = Vec::new();
    let mut solver = None;

    let (terms, emi, solved_value, methodology) = match input.solve_for {
        SolveFor::Emi => {
            let terms = LoanTerms {
                principal: require(input.principal, "principal")?,
                annual_rate_pct: require(input.annual_rate_pct, "annual_rate_pct")?,
                tenure_years: require(input.tenure_years, "tenure_years")?,
            };
            warnings.extend(terms.degenerate_warnings());
            let emi = compute_emi(terms.principal, terms.annual_rate_pct, terms.tenure_years);
            (terms, emi, emi, "EMI (closed-form amortised payment)")
        }
        SolveFor::LoanAmount => {
            let emi = require(input.emi, "emi")?;
            let rate = require(input.annual_rate_pct, "annual_rate_pct")?;
            let tenure = require(input.tenure_years, "tenure_years")?;
            let principal = loan_amount_from_emi(emi, rate, tenure);
            if principal.is_zero() {
                warnings.push("EMI, rate and tenure must be positive; loan amount is zero".into());
            }
            let terms = LoanTerms {
                principal,
                annual_rate_pct: rate,
                tenure_years: tenure,
            };
            (terms, emi, principal, "Loan amount (inverse EMI formula)")
        }
        SolveFor::InterestRate => {
            let emi = require(input.emi, "emi")?;
            let principal = require(input.principal, "principal")?;
            let tenure = require(input.tenure_years, "tenure_years")?;
            let rate = match solve_rate(emi, principal, tenure, solver_cfg) {
                Some(out) => {
                    if !out.converged {
                        warnings.push(format!(
                            "Rate search did not reach the {} tolerance within {} iterations; best estimate returned",
                            solver_cfg.tolerance, out.iterations
                        ));
                    }
                    let rate = round_to(out.value, solver_cfg.result_decimals);
                    solver = Some(out);
                    rate
                }
                None => {
                    warnings.push("EMI, principal and tenure must be positive; rate is zero".into());
                    Decimal::ZERO
                }
            };
            let terms = LoanTerms {
                principal,
                annual_rate_pct: rate,
                tenure_years: tenure,
            };
            (terms, emi, rate, "Interest rate (bisection over EMI formula)")
        }
        SolveFor::Tenure => {
            let emi = require(input.emi, "emi")?;
            let principal = require(input.principal, "principal")?;
            let rate = require(input.annual_rate_pct, "annual_rate_pct")?;
            let tenure = match solve_tenure(emi, principal, rate, solver_cfg) {
                Some(out) => {
                    if !out.converged {
                        warnings.push(format!(
                            "Tenure search did not reach the {} tolerance within {} iterations; best estimate returned",
                            solver_cfg.tolerance, out.iterations
                        ));
                    }
                    let tenure = round_to(out.value, solver_cfg.result_decimals);
                    solver = Some(out);
                    tenure
                }
                None => {
                    warnings.push("EMI, principal and rate must be positive; tenure is zero".into());
                    Decimal::ZERO
                }
            };
            let terms = LoanTerms {
                principal,
                annual_rate_pct: rate,
                tenure_years: tenure,
            };
            (terms, emi, tenure, "Loan tenure (bisection over EMI formula)")
        }
    };

    let total_payment = emi * months_in(terms.tenure_years);
    let total_interest = total_payment - terms.principal;

    let schedule = build_amortization_schedule(
        terms.principal,
        terms.annual_rate_pct,
        terms.tenure_years,
    );
    let (schedule_preview, chart) = if schedule.is_empty() {
        (None, Vec::new())
    } else {
        (
            Some(schedule_page(&schedule, 1, config.schedule.page_size)),
            emi_chart_series(terms.principal, &schedule, config.chart.target_points),
        )
    };

    let tenure_breakdown = match input.solve_for {
        SolveFor::Tenure => Some(tenure_breakdown(terms.tenure_years)),
        _ => None,
    };

    let output = LoanCalculatorOutput {
        solve_for: input.solve_for,
        solved_value,
        terms,
        emi,
        total_interest,
        total_payment,
        tenure_breakdown,
        solver,
        schedule_preview,
        chart,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}
