//! Fixed deposit maturity with three payout/compounding modes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deposits::maturity::maturity_date_for_years;
use crate::time_value::{annual_rate, growth_factor};
use crate::types::*;
use crate::FinCalcResult;

/// How interest accrues on a fixed deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// Interest paid out monthly: simple interest, no compounding.
    Monthly,
    /// Compounded every quarter.
    Quarterly,
    /// Compounded annually and paid at maturity.
    #[default]
    Cumulative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub duration: Decimal,
    #[serde(default)]
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub compounding: Compounding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdOutput {
    pub principal: Money,
    pub interest_earned: Money,
    pub maturity_value: Money,
    pub duration_years: Years,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    pub chart: Vec<ChartPoint>,
}

/// Maturity value of a fixed deposit.
///
/// - `Monthly`: `P + P × r × years`
/// - `Quarterly`: `P × (1 + r/4)^(4 × years)`
/// - `Cumulative`: `P × (1 + r)^years`
pub fn compute_fd(
    principal: Money,
    annual_rate_pct: Percent,
    years: Years,
    compounding: Compounding,
) -> Money {
    if principal <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || years <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let r = annual_rate(annual_rate_pct);

    let factor = match compounding {
        Compounding::Monthly => r.checked_mul(years).and_then(|i| i.checked_add(Decimal::ONE)),
        Compounding::Quarterly => growth_factor(r / dec!(4), years.saturating_mul(dec!(4))),
        Compounding::Cumulative => growth_factor(r, years),
    };

    factor
        .and_then(|f| principal.checked_mul(f))
        .unwrap_or(Decimal::ZERO)
}

/// Principal vs. interest at each whole year, plus the exact maturity when
/// the duration has a fractional part.
pub fn fd_chart_series(
    principal: Money,
    annual_rate_pct: Percent,
    years: Years,
    compounding: Compounding,
) -> Vec<ChartPoint> {
    if years <= Decimal::ZERO {
        return Vec::new();
    }
    let mut checkpoints: Vec<Years> = Vec::new();
    let mut y = Decimal::ONE;
    while y <= years {
        checkpoints.push(y);
        y += Decimal::ONE;
    }
    if checkpoints.last() != Some(&years) {
        checkpoints.push(years);
    }

    checkpoints
        .into_iter()
        .map(|y| {
            let value = compute_fd(principal, annual_rate_pct, y, compounding);
            ChartPoint::new(format!("Year {}", y.normalize()))
                .with("Principal", principal)
                .with("Interest", (value - principal).max(Decimal::ZERO))
        })
        .collect()
}

pub fn calculate_fd(input: &FdInput) -> FinCalcResult<ComputationOutput<FdOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let years = input.duration_unit.to_years(input.duration);
    let maturity_value = compute_fd(input.principal, input.annual_rate_pct, years, input.compounding);
    if maturity_value.is_zero() {
        warnings.push("Principal, rate and duration must be positive; maturity is zero".into());
    }
    let interest_earned = if maturity_value.is_zero() {
        Decimal::ZERO
    } else {
        maturity_value - input.principal
    };

    let maturity_date = input
        .investment_date
        .and_then(|d| maturity_date_for_years(d, years));

    let output = FdOutput {
        principal: input.principal,
        interest_earned,
        maturity_value,
        duration_years: years,
        maturity_date,
        chart: fd_chart_series(input.principal, input.annual_rate_pct, years, input.compounding),
    };

    let methodology = match input.compounding {
        Compounding::Monthly => "Fixed deposit, monthly payout (simple interest)",
        Compounding::Quarterly => "Fixed deposit, quarterly compounding",
        Compounding::Cumulative => "Fixed deposit, cumulative (annual compounding)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_single_year_exact() {
        let v = compute_fd(dec!(1000), dec!(10), dec!(1), Compounding::Cumulative);
        assert_eq!(v, dec!(1100));
    }

    #[test]
    fn test_monthly_payout_is_simple_interest() {
        let v = compute_fd(dec!(100_000), dec!(7), dec!(5), Compounding::Monthly);
        assert_eq!(v, dec!(135_000));
    }

    #[test]
    fn test_quarterly_compounding() {
        // 1000 at 8% quarterly for 1 year = 1000 * 1.02^4
        let v = compute_fd(dec!(1000), dec!(8), dec!(1), Compounding::Quarterly);
        assert_eq!(v, dec!(1082.43216));
    }

    #[test]
    fn test_modes_order() {
        let p = dec!(100_000);
        let simple = compute_fd(p, dec!(7), dec!(5), Compounding::Monthly);
        let annual = compute_fd(p, dec!(7), dec!(5), Compounding::Cumulative);
        let quarterly = compute_fd(p, dec!(7), dec!(5), Compounding::Quarterly);
        assert!(simple < annual && annual < quarterly);
    }

    #[test]
    fn test_degenerate_fd() {
        assert_eq!(
            compute_fd(dec!(0), dec!(7), dec!(5), Compounding::Cumulative),
            Decimal::ZERO
        );
        assert_eq!(
            compute_fd(dec!(1000), dec!(7), dec!(0), Compounding::Quarterly),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_overflowing_simple_interest_is_zero() {
        let huge = dec!(10_000_000_000_000_000_000_000_000);
        assert_eq!(
            compute_fd(dec!(1000), huge, huge, Compounding::Monthly),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_chart_with_fractional_year() {
        let chart = fd_chart_series(dec!(1000), dec!(10), dec!(2.5), Compounding::Cumulative);
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[0].label, "Year 1");
        assert_eq!(chart[0].value("Interest"), Some(dec!(100)));
        assert_eq!(chart[2].label, "Year 2.5");
    }

    #[test]
    fn test_calculate_fd_in_months() {
        let input = FdInput {
            principal: dec!(1000),
            annual_rate_pct: dec!(10),
            duration: dec!(12),
            duration_unit: DurationUnit::Months,
            compounding: Compounding::Cumulative,
            investment_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        let out = calculate_fd(&input).unwrap();
        assert_eq!(out.result.maturity_value, dec!(1100));
        assert_eq!(out.result.interest_earned, dec!(100));
        assert_eq!(out.result.maturity_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(out.warnings.is_empty());
    }
}
