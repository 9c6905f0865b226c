//! Recurring deposit maturity.
//!
//! Applies the quarterly rate `pct / 400` across `n` monthly instalments in
//! the ordinary-annuity future-value formula. The quarterly-rate-on-monthly-
//! periods mix is the product convention and is kept as is.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::CalculatorConfig;
use crate::deposits::maturity::maturity_date;
use crate::time_value::{annuity_future_value, quarterly_rate};
use crate::types::*;
use crate::FinCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdInput {
    pub monthly_deposit: Money,
    pub annual_rate_pct: Percent,
    pub months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdOutput {
    pub total_deposit: Money,
    pub interest_earned: Money,
    pub maturity_value: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    pub chart: Vec<ChartPoint>,
}

/// `deposit × ((1+r)^n − 1) / r` with `r` the quarterly rate and `n` months.
pub fn compute_rd(monthly_deposit: Money, annual_rate_pct: Percent, months: u32) -> Money {
    if monthly_deposit <= Decimal::ZERO || annual_rate_pct <= Decimal::ZERO || months == 0 {
        return Decimal::ZERO;
    }
    let r = quarterly_rate(annual_rate_pct);
    annuity_future_value(monthly_deposit, r, Decimal::from(months)).unwrap_or(Decimal::ZERO)
}

/// Deposits vs. interest every `max(1, months / target_points)` months,
/// always ending on the final month.
pub fn rd_chart_series(
    monthly_deposit: Money,
    annual_rate_pct: Percent,
    months: u32,
    target_points: u32,
) -> Vec<ChartPoint> {
    if months == 0 {
        return Vec::new();
    }
    let interval = (months / target_points.max(1)).max(1);
    let mut checkpoints: Vec<u32> = (1..=months).filter(|m| m % interval == 0).collect();
    if checkpoints.last() != Some(&months) {
        checkpoints.push(months);
    }

    checkpoints
        .into_iter()
        .map(|m| {
            let deposits = monthly_deposit * Decimal::from(m);
            let value = compute_rd(monthly_deposit, annual_rate_pct, m);
            ChartPoint::new(format!("Month {m}"))
                .with("Deposits", deposits)
                .with("Interest", (value - deposits).max(Decimal::ZERO))
        })
        .collect()
}

pub fn calculate_rd(
    input: &RdInput,
    config: &CalculatorConfig,
) -> FinCalcResult<ComputationOutput<RdOutput>> {
    let start = Instant::now();
    config.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    let maturity_value = compute_rd(input.monthly_deposit, input.annual_rate_pct, input.months);
    let total_deposit = if maturity_value.is_zero() {
        warnings.push("Deposit, rate and months must be positive; maturity is zero".into());
        Decimal::ZERO
    } else {
        input.monthly_deposit * Decimal::from(input.months)
    };

    let output = RdOutput {
        total_deposit,
        interest_earned: maturity_value - total_deposit,
        maturity_value,
        maturity_date: input
            .investment_date
            .and_then(|d| maturity_date(d, input.months, DurationUnit::Months)),
        chart: rd_chart_series(
            input.monthly_deposit,
            input.annual_rate_pct,
            input.months,
            config.chart.target_points,
        ),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Recurring deposit (quarterly rate, monthly instalments)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
