//! Equated monthly instalment (EMI) formula and its inverses.
//!
//! `compute_emi` is the closed-form amortised payment. Loan amount has an
//! algebraic inverse; rate and tenure are found by bisection over the EMI
//! formula. Every function returns zero on non-positive inputs instead of
//! failing, since the calculators re-run on every keystroke.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::bisection::{bisect, BisectionOutcome, Monotonicity};
use crate::config::SolverConfig;
use crate::time_value::{growth_factor, monthly_rate, months_in, round_to};
use crate::types::{Money, Percent, Years};

/// Monthly EMI: `P × r × (1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate
/// and `n = tenure_years × 12`.
pub fn compute_emi(principal: Money, annual_rate_pct: Percent, tenure_years: Years) -> Money {
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || tenure_years <= Decimal::ZERO
    {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    let n = months_in(tenure_years);

    // (1+r)^n -> inf, so the EMI tends to the interest-only payment
    let interest_only = principal.saturating_mul(r);
    let Some(factor) = growth_factor(r, n) else {
        return interest_only;
    };
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .unwrap_or_else(|| {
            warn!(%principal, %annual_rate_pct, %tenure_years, "EMI overflowed; using interest-only payment");
            interest_only
        })
}

/// Principal that a given EMI services: `EMI × ((1+r)^n − 1) / (r × (1+r)^n)`.
pub fn loan_amount_from_emi(emi: Money, annual_rate_pct: Percent, tenure_years: Years) -> Money {
    if emi <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || tenure_years <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    let n = months_in(tenure_years);

    // Perpetuity limit
    let perpetuity = emi.checked_div(r).unwrap_or(Decimal::MAX);
    let Some(factor) = growth_factor(r, n) else {
        return perpetuity;
    };

    emi.checked_mul(factor - Decimal::ONE)
        .and_then(|v| r.checked_mul(factor).and_then(|d| v.checked_div(d)))
        .unwrap_or_else(|| {
            warn!(%emi, %annual_rate_pct, %tenure_years, "loan amount overflowed; using perpetuity value");
            perpetuity
        })
}

/// Annual rate (percent, 2 dp) at which `principal` over `tenure_years`
/// produces `emi`. Uses the default solver settings.
pub fn rate_from_emi(emi: Money, principal: Money, tenure_years: Years) -> Percent {
    solve_rate(emi, principal, tenure_years, &SolverConfig::default())
        .map(|out| round_to(out.value, SolverConfig::default().result_decimals))
        .unwrap_or(Decimal::ZERO)
}

/// Tenure (years, 2 dp) at which `principal` at `annual_rate_pct` produces
/// `emi`. Uses the default solver settings.
pub fn tenure_from_emi(emi: Money, principal: Money, annual_rate_pct: Percent) -> Years {
    solve_tenure(emi, principal, annual_rate_pct, &SolverConfig::default())
        .map(|out| round_to(out.value, SolverConfig::default().result_decimals))
        .unwrap_or(Decimal::ZERO)
}

/// Bisection over the configured rate bracket. `None` for degenerate input.
pub fn solve_rate(
    emi: Money,
    principal: Money,
    tenure_years: Years,
    config: &SolverConfig,
) -> Option<BisectionOutcome> {
    if emi <= Decimal::ZERO || principal <= Decimal::ZERO || tenure_years <= Decimal::ZERO {
        debug!("rate solver skipped: non-positive input");
        return None;
    }
    Some(bisect(
        |rate| compute_emi(principal, rate, tenure_years),
        emi,
        config.rate_bracket_pct,
        Monotonicity::Increasing,
        config,
    ))
}

/// Bisection over the configured tenure bracket. A longer tenure lowers the
/// EMI, so the search runs with decreasing monotonicity.
pub fn solve_tenure(
    emi: Money,
    principal: Money,
    annual_rate_pct: Percent,
    config: &SolverConfig,
) -> Option<BisectionOutcome> {
    if emi <= Decimal::ZERO || principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO {
        debug!("tenure solver skipped: non-positive input");
        return None;
    }
    Some(bisect(
        |years| compute_emi(principal, annual_rate_pct, years),
        emi,
        config.tenure_bracket_years,
        Monotonicity::Decreasing,
        config,
    ))
}
