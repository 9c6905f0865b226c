//! Bracketed bisection for monotone functions.
//!
//! Used to invert the EMI formula for rate and tenure, where no closed form
//! exists. The loop is bounded by `max_iterations` and always returns the
//! last midpoint, converged or not.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SolverConfig;

/// How the function output moves as the search variable increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Monotonicity {
    Increasing,
    Decreasing,
}

/// Result of a bisection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BisectionOutcome {
    /// Last midpoint evaluated (unrounded).
    pub value: Decimal,
    /// Number of function evaluations performed.
    pub iterations: u32,
    /// Whether `|f(value) - target|` fell below the tolerance.
    pub converged: bool,
    /// `f(value) - target` at the returned value.
    pub residual: Decimal,
}

/// Find `x` in `bracket` with `f(x) ≈ target`.
///
/// The bracket is halved each iteration; the half kept is the one the
/// target must lie in given `monotonicity`. Stops once the residual is
/// within `config.tolerance` or after `config.max_iterations` evaluations.
pub fn bisect<F>(
    f: F,
    target: Decimal,
    bracket: (Decimal, Decimal),
    monotonicity: Monotonicity,
    config: &SolverConfig,
) -> BisectionOutcome
where
    F: Fn(Decimal) -> Decimal,
{
    let (mut low, mut high) = bracket;
    let mut mid = (low + high) / dec!(2);
    let mut residual = Decimal::ZERO;
    let mut iterations = 0;

    for i in 0..config.max_iterations {
        iterations = i + 1;
        mid = (low + high) / dec!(2);
        let value = f(mid);
        residual = value - target;

        if residual.abs() < config.tolerance {
            debug!(%mid, iterations, "bisection converged");
            return BisectionOutcome {
                value: mid,
                iterations,
                converged: true,
                residual,
            };
        }

        let below_target = value < target;
        match (monotonicity, below_target) {
            (Monotonicity::Increasing, true) | (Monotonicity::Decreasing, false) => low = mid,
            _ => high = mid,
        }
    }

    warn!(%mid, %residual, iterations, "bisection hit iteration ceiling");
    BisectionOutcome {
        value: mid,
        iterations,
        converged: false,
        residual,
    }
}
