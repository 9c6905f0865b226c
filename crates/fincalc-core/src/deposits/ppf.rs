use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::deposits::maturity::maturity_date;
use crate::time_value::annual_rate;
use crate::types::*;
use crate::FinCalcResult;

/// Durations the PPF calculator offers (15-year lock-in plus 5-year extensions).
pub const PPF_DURATION_OPTIONS: [u32; 4] = [15, 20, 25, 30];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfInput {
    pub yearly_deposit: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpfOutput {
    pub total_deposit: Money,
    pub interest_earned: Money,
    pub maturity_value: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    pub chart: Vec<ChartPoint>,
}

/// Year-end PPF balances. Each year the deposit lands first, then interest
/// accrues on the new balance.
pub fn ppf_balances(yearly_deposit: Money, annual_rate_pct: Percent, years: u32) -> Vec<Money> {
    if yearly_deposit <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || years == 0 {
        return Vec::new();
    }
    let r = annual_rate(annual_rate_pct);
    let mut balance = Decimal::ZERO;
    let mut balances = Vec::new();
    for year in 1..=years {
        let next = balance
            .checked_add(yearly_deposit)
            .and_then(|b| b.checked_mul(r).and_then(|interest| b.checked_add(interest)));
        match next {
            Some(b) => balance = b,
            None => {
                warn!(year, "PPF balance overflowed Decimal range");
                return Vec::new();
            }
        }
        balances.push(balance);
    }
    balances
}

/// Maturity value after `years` of deposit-then-interest.
pub fn compute_ppf(yearly_deposit: Money, annual_rate_pct: Percent, years: u32) -> Money {
    ppf_balances(yearly_deposit, annual_rate_pct, years)
        .last()
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// Deposits vs. interest at the end of every year.
pub fn ppf_chart_series(yearly_deposit: Money, annual_rate_pct: Percent, years: u32) -> Vec<ChartPoint> {
    ppf_balances(yearly_deposit, annual_rate_pct, years)
        .into_iter()
        .enumerate()
        .map(|(i, balance)| {
            let year = i as u32 + 1;
            let deposits = yearly_deposit * Decimal::from(year);
            ChartPoint::new(format!("Year {year}"))
                .with("Deposits", deposits)
                .with("Interest", balance - deposits)
        })
        .collect()
}

pub fn calculate_ppf(input: &PpfInput) -> FinCalcResult<ComputationOutput<PpfOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !PPF_DURATION_OPTIONS.contains(&input.years) {
        warnings.push(format!(
            "PPF accounts run for 15 years with 5-year extensions; {} years is not a standard term",
            input.years
        ));
    }

    let maturity_value = compute_ppf(input.yearly_deposit, input.annual_rate_pct, input.years);
    let degenerate = input.yearly_deposit <= Decimal::ZERO
        || input.annual_rate_pct <= Decimal::ZERO
        || input.years == 0;
    let total_deposit = if maturity_value.is_zero() {
        if degenerate {
            warnings.push("Deposit, rate and years must be positive; maturity is zero".into());
        } else {
            warnings.push("Maturity value exceeds the representable range; reported as zero".into());
        }
        Decimal::ZERO
    } else {
        input.yearly_deposit * Decimal::from(input.years)
    };

    let output = PpfOutput {
        total_deposit,
        interest_earned: maturity_value - total_deposit,
        maturity_value,
        maturity_date: input
            .investment_date
            .and_then(|d| maturity_date(d, input.years, DurationUnit::Years)),
        chart: ppf_chart_series(input.yearly_deposit, input.annual_rate_pct, input.years),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Public Provident Fund (annual deposit, then annual interest)",
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
    fn test_deposit_then_interest() {
        // Year 1: (0 + 1000) * 1.1 = 1100; year 2: (1100 + 1000) * 1.1 = 2310
        assert_eq!(compute_ppf(dec!(1000), dec!(10), 1), dec!(1100));
        assert_eq!(compute_ppf(dec!(1000), dec!(10), 2), dec!(2310));
    }

    #[test]
    fn test_ordering_matters() {
        // Interest-then-deposit would give 2100 after two years
        let ppf = compute_ppf(dec!(1000), dec!(10), 2);
        assert!(ppf > dec!(2100));
    }

    #[test]
    fn test_degenerate_ppf() {
        assert_eq!(compute_ppf(dec!(150_000), dec!(7.1), 0), Decimal::ZERO);
        assert_eq!(compute_ppf(dec!(0), dec!(7.1), 15), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_balance_is_zero() {
        assert_eq!(compute_ppf(dec!(150_000), dec!(50), 200), Decimal::ZERO);
        assert!(ppf_balances(dec!(150_000), dec!(50), 200).is_empty());

        let out = calculate_ppf(&PpfInput {
            yearly_deposit: dec!(150_000),
            annual_rate_pct: dec!(50),
            years: 200,
            investment_date: None,
        })
        .unwrap();
        assert_eq!(out.result.maturity_value, Decimal::ZERO);
        assert_eq!(out.result.interest_earned, Decimal::ZERO);
        assert!(out.result.chart.is_empty());
        assert!(out.warnings.iter().any(|w| w.contains("representable range")));
    }

    #[test]
    fn test_chart_per_year() {
        let chart = ppf_chart_series(dec!(1000), dec!(10), 2);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[1].label, "Year 2");
        assert_eq!(chart[1].value("Deposits"), Some(dec!(2000)));
        assert_eq!(chart[1].value("Interest"), Some(dec!(310)));
    }

    #[test]
    fn test_calculate_ppf_non_standard_term_warns() {
        let input = PpfInput {
            yearly_deposit: dec!(150_000),
            annual_rate_pct: dec!(7.1),
            years: 12,
            investment_date: None,
        };
        let out = calculate_ppf(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.total_deposit, dec!(1_800_000));
        assert!(out.result.interest_earned > Decimal::ZERO);
    }

    #[test]
    fn test_calculate_ppf_standard_term() {
        let input = PpfInput {
            yearly_deposit: dec!(150_000),
            annual_rate_pct: dec!(7.1),
            years: 15,
            investment_date: NaiveDate::from_ymd_opt(2024, 4, 1),
        };
        let out = calculate_ppf(&input).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.maturity_date, NaiveDate::from_ymd_opt(2039, 4, 1));
        assert_eq!(out.result.chart.len(), 15);
    }
}
