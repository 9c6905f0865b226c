//! Systematic investment plan (SIP) future value.
//!
//! Instalments are made at the start of each month (annuity-due), hence the
//! trailing `(1 + r)` factor on top of the ordinary annuity.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{annuity_future_value, monthly_rate, months_in};
use crate::types::*;
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: Money,
    pub expected_return_pct: Percent,
    pub years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub total_investment: Money,
    pub wealth_gained: Money,
    pub maturity_value: Money,
    pub chart: Vec<ChartPoint>,
}

/// `deposit × ((1+r)^n − 1)/r × (1+r)` with `r` monthly and `n = years × 12`.
pub fn compute_sip(monthly_investment: Money, expected_return_pct: Percent, years: Years) -> Money {
    if monthly_investment <= Decimal::ZERO
        || expected_return_pct <= Decimal::ZERO
        || years <= Decimal::ZERO
    {
        return Decimal::ZERO;
    }
    let r = monthly_rate(expected_return_pct);
    annuity_future_value(monthly_investment, r, months_in(years))
        .and_then(|fv| fv.checked_mul(Decimal::ONE + r))
        .unwrap_or(Decimal::ZERO)
}

/// Invested amount, wealth gained and value at the end of each whole year.
pub fn sip_chart_series(
    monthly_investment: Money,
    expected_return_pct: Percent,
    years: Years,
) -> Vec<ChartPoint> {
    let whole_years = years.floor().to_u32().unwrap_or(0);
    (1..=whole_years)
        .map(|year| {
            let y = Decimal::from(year);
            let invested = monthly_investment * months_in(y);
            let value = compute_sip(monthly_investment, expected_return_pct, y);
            ChartPoint::new(format!("Year {year}"))
                .with("Invested Amount", invested)
                .with("Wealth Gained", value - invested)
                .with("Maturity Value", value)
        })
        .collect()
}

pub fn calculate_sip(input: &SipInput) -> FinCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let maturity_value = compute_sip(input.monthly_investment, input.expected_return_pct, input.years);
    let total_investment = if maturity_value.is_zero() {
        warnings.push("Investment, return and years must be positive; maturity is zero".into());
        Decimal::ZERO
    } else {
        input.monthly_investment * months_in(input.years)
    };

    let output = SipOutput {
        total_investment,
        wealth_gained: maturity_value - total_investment,
        maturity_value,
        chart: sip_chart_series(input.monthly_investment, input.expected_return_pct, input.years),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP future value (monthly annuity-due)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sip_known_answer() {
        // 10k/month at 12% for 10 years ~ 23.23 lakh
        let value = compute_sip(dec!(10_000), dec!(12), dec!(10));
        assert!((value - dec!(2_323_390.76)).abs() < dec!(1), "value = {value}");
    }

    #[test]
    fn test_annuity_due_factor_kept() {
        // Every instalment compounds from the start of its month:
        // sum of 1000 * 1.01^k for k = 1..=12
        let mut expected = Decimal::ZERO;
        let mut growth = Decimal::ONE;
        for _ in 0..12 {
            growth *= dec!(1.01);
            expected += dec!(1000) * growth;
        }
        let value = compute_sip(dec!(1000), dec!(12), dec!(1));
        assert!((value - expected).abs() < dec!(0.000001), "value = {value}");
    }

    #[test]
    fn test_degenerate_sip() {
        assert_eq!(compute_sip(dec!(0), dec!(12), dec!(10)), Decimal::ZERO);
        assert_eq!(compute_sip(dec!(10_000), dec!(12), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_chart_yearly_points() {
        let chart = sip_chart_series(dec!(10_000), dec!(12), dec!(10));
        assert_eq!(chart.len(), 10);
        assert_eq!(chart[0].label, "Year 1");
        assert_eq!(chart[0].value("Invested Amount"), Some(dec!(120_000)));
        let last = &chart[9];
        assert_eq!(
            last.value("Maturity Value"),
            Some(compute_sip(dec!(10_000), dec!(12), dec!(10)))
        );
    }

    #[test]
    fn test_calculate_sip() {
        let input = SipInput {
            monthly_investment: dec!(10_000),
            expected_return_pct: dec!(12),
            years: dec!(10),
        };
        let out = calculate_sip(&input).unwrap();
        assert_eq!(out.result.total_investment, dec!(1_200_000));
        assert_eq!(
            out.result.wealth_gained,
            out.result.maturity_value - dec!(1_200_000)
        );
        assert!(out.warnings.is_empty());
    }
}
