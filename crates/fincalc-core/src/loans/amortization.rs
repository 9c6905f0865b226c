use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::config::CalculatorConfig;
use crate::loans::emi::compute_emi;
use crate::loans::LoanTerms;
use crate::time_value::{monthly_rate, months_in, whole_periods};
use crate::types::*;
use crate::FinCalcResult;

/// Balance at or below which the loan is considered fully repaid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Longest schedule that is ever built (100 years). Longer tenures are cut
/// here and the last row settles the remaining balance.
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// A single month in the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub emi: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
}

/// One page of a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePage {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_entries: usize,
    pub has_more: bool,
    pub entries: Vec<AmortizationEntry>,
}

/// Output of the amortization calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: Vec<AmortizationEntry>,
    pub chart: Vec<ChartPoint>,
}

/// Month-by-month schedule for a fixed-EMI loan.
///
/// Runs for `ceil(tenure_years × 12)` months at most and stops as soon as
/// the balance is retired. The final entry's balance is clamped to zero and
/// its principal component to the balance it actually paid off.
pub fn build_amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    tenure_years: Years,
) -> Vec<AmortizationEntry> {
    let emi = compute_emi(principal, annual_rate_pct, tenure_years);
    if emi.is_zero() {
        return Vec::new();
    }

    let r = monthly_rate(annual_rate_pct);
    let scheduled_months = whole_periods(months_in(tenure_years));
    if scheduled_months > MAX_SCHEDULE_MONTHS {
        warn!(scheduled_months, max = MAX_SCHEDULE_MONTHS, "schedule truncated");
    }
    let total_months = scheduled_months.min(MAX_SCHEDULE_MONTHS);

    let mut schedule = Vec::with_capacity(total_months as usize);
    let mut balance = principal;

    for month in 1..=total_months {
        let interest = balance * r;
        let mut principal_paid = emi - interest;
        let opening = balance;
        balance -= principal_paid;

        let retired = balance <= BALANCE_EPSILON || month == total_months;
        if retired {
            principal_paid = opening;
            balance = Decimal::ZERO;
        }

        schedule.push(AmortizationEntry {
            month,
            emi,
            principal_component: principal_paid,
            interest_component: interest,
            remaining_balance: balance,
        });

        if retired {
            break;
        }
    }

    schedule
}

/// Slice a schedule into pages. Pages are 1-based; a page past the end
/// comes back empty.
pub fn schedule_page(schedule: &[AmortizationEntry], page: usize, page_size: usize) -> SchedulePage {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_entries = schedule.len();
    let total_pages = total_entries.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total_entries);
    let end = (start + page_size).min(total_entries);

    SchedulePage {
        page,
        page_size,
        total_pages,
        total_entries,
        has_more: end < total_entries,
        entries: schedule[start..end].to_vec(),
    }
}

/// Cumulative principal vs. interest, sampled to roughly `target_points`.
///
/// Keeps every `max(1, len / target_points)`-th entry plus the final one.
pub fn emi_chart_series(
    principal: Money,
    schedule: &[AmortizationEntry],
    target_points: u32,
) -> Vec<ChartPoint> {
    let len = schedule.len();
    let interval = (len / target_points.max(1) as usize).max(1);

    let mut points = Vec::new();
    let mut cumulative_interest = Decimal::ZERO;

    for (idx, entry) in schedule.iter().enumerate() {
        cumulative_interest += entry.interest_component;
        if idx % interval == 0 || idx == len - 1 {
            points.push(
                ChartPoint::new(format!("Month {}", entry.month))
                    .with("Principal Paid", principal - entry.remaining_balance)
                    .with("Interest Paid", cumulative_interest),
            );
        }
    }

    points
}

/// Full schedule plus totals and chart for a set of loan terms.
pub fn calculate_amortization(
    input: &LoanTerms,
    config: &CalculatorConfig,
) -> FinCalcResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    config.validate()?;
    let mut warnings = input.degenerate_warnings();

    let schedule = build_amortization_schedule(
        input.principal,
        input.annual_rate_pct,
        input.tenure_years,
    );
    let emi = schedule.first().map(|e| e.emi).unwrap_or(Decimal::ZERO);
    let total_payment: Money = schedule
        .iter()
        .map(|e| e.principal_component + e.interest_component)
        .sum();
    let total_interest: Money = schedule.iter().map(|e| e.interest_component).sum();

    if schedule.is_empty() && warnings.is_empty() {
        warnings.push("Schedule is empty".into());
    }
    if whole_periods(months_in(input.tenure_years)) > MAX_SCHEDULE_MONTHS {
        warnings.push(format!(
            "Schedule limited to {MAX_SCHEDULE_MONTHS} months; the last row settles the remaining balance"
        ));
    }

    let chart = emi_chart_series(input.principal, &schedule, config.chart.target_points);

    let output = AmortizationOutput {
        emi,
        total_interest,
        total_payment,
        schedule,
        chart,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-EMI amortization schedule (monthly reducing balance)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
