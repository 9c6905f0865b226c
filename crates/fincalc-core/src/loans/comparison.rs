use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::CalculatorConfig;
use crate::error::FinCalcError;
use crate::loans::amortization::MAX_SCHEDULE_MONTHS;
use crate::loans::emi::compute_emi;
use crate::loans::LoanTerms;
use crate::time_value::{growth_factor, monthly_rate, months_in, round_to, whole_periods};
use crate::types::*;
use crate::FinCalcResult;

/// Colour tags assigned by position when an entry carries none.
pub const DEFAULT_LOAN_COLORS: [&str; 4] = ["#8B5CF6", "#3B82F6", "#10B981", "#F97316"];

const MIN_LOANS: usize = 2;
const MAX_LOANS: usize = 4;

/// One loan in a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonEntry {
    pub name: String,
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub loans: Vec<LoanComparisonEntry>,
}

/// Derived figures for one compared loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub name: String,
    pub terms: LoanTerms,
    pub color: String,
    pub emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub loans: Vec<LoanSummary>,
    /// EMI / Total Interest / Total Payment rows, one series per loan.
    pub metrics: Vec<ChartPoint>,
    /// Outstanding principal of every loan on a shared month grid.
    pub outstanding_timeline: Vec<ChartPoint>,
    /// Loan with the smallest total interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_total_interest: Option<String>,
}

/// EMI, total amount (`EMI × months`) and total interest for one loan.
pub fn summarize_loan(entry: &LoanComparisonEntry, position: usize) -> LoanSummary {
    let t = &entry.terms;
    let emi = compute_emi(t.principal, t.annual_rate_pct, t.tenure_years);
    let total_amount = emi * months_in(t.tenure_years);
    let total_interest = if emi.is_zero() {
        Decimal::ZERO
    } else {
        total_amount - t.principal
    };
    LoanSummary {
        name: entry.name.clone(),
        terms: t.clone(),
        color: entry
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_LOAN_COLORS[position % DEFAULT_LOAN_COLORS.len()].into()),
        emi,
        total_interest,
        total_amount,
    }
}

/// Closed-form outstanding principal after `elapsed_months` payments:
/// `(EMI / r) × (1 − (1+r)^(−remaining))`, floored at zero.
pub fn outstanding_principal(summary: &LoanSummary, elapsed_months: u32) -> Money {
    let t = &summary.terms;
    if elapsed_months == 0 {
        return t.principal;
    }
    let total = months_in(t.tenure_years);
    let elapsed = Decimal::from(elapsed_months);
    if summary.emi.is_zero() || elapsed > total {
        return Decimal::ZERO;
    }
    let r = monthly_rate(t.annual_rate_pct);
    let remaining = total - elapsed;
    let discount = match growth_factor(r, remaining) {
        Some(f) if !f.is_zero() => Decimal::ONE / f,
        _ => Decimal::ZERO,
    };
    let outstanding = summary.emi / r * (Decimal::ONE - discount);
    outstanding.max(Decimal::ZERO)
}

/// Outstanding principal of each loan every `step_months`, from month 0 to
/// the longest tenure. Values are rounded to whole currency units; a loan
/// already past its tenure reports zero.
pub fn outstanding_timeline(loans: &[LoanSummary], step_months: u32) -> Vec<ChartPoint> {
    let step = step_months.max(1);
    let max_months = loans
        .iter()
        .map(|l| whole_periods(months_in(l.terms.tenure_years)))
        .max()
        .unwrap_or(0)
        .min(MAX_SCHEDULE_MONTHS);

    let mut points = Vec::new();
    let mut month = 0;
    while month <= max_months {
        let label = if month == 0 {
            "Start".to_string()
        } else {
            format!("{month} mo")
        };
        let point = loans.iter().fold(ChartPoint::new(label), |p, loan| {
            p.with(&loan.name, round_to(outstanding_principal(loan, month), 0))
        });
        points.push(point);
        month += step;
    }
    points
}

/// Compare 2–4 loans side by side.
pub fn compare_loans(
    input: &LoanComparisonInput,
    config: &CalculatorConfig,
) -> FinCalcResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    config.validate()?;
    let mut warnings: Vec<String> = Vec::new();

    if input.loans.is_empty() {
        return Err(FinCalcError::InsufficientData(
            "Loan comparison requires at least one loan".into(),
        ));
    }
    if input.loans.len() < MIN_LOANS || input.loans.len() > MAX_LOANS {
        warnings.push(format!(
            "Comparison is designed for {MIN_LOANS}-{MAX_LOANS} loans; got {}",
            input.loans.len()
        ));
    }

    let loans: Vec<LoanSummary> = input
        .loans
        .iter()
        .enumerate()
        .map(|(i, entry)| summarize_loan(entry, i))
        .collect();

    for (entry, summary) in input.loans.iter().zip(&loans) {
        for w in entry.terms.degenerate_warnings() {
            warnings.push(format!("{}: {w}", summary.name));
        }
    }

    let metric_row = |label: &str, pick: fn(&LoanSummary) -> Money| {
        loans
            .iter()
            .fold(ChartPoint::new(label), |p, l| p.with(&l.name, pick(l)))
    };
    let metrics = vec![
        metric_row("EMI", |l| l.emi),
        metric_row("Total Interest", |l| l.total_interest),
        metric_row("Total Payment", |l| l.total_amount),
    ];

    let outstanding_timeline = outstanding_timeline(&loans, config.chart.comparison_step_months);

    let lowest_total_interest = loans
        .iter()
        .filter(|l| !l.emi.is_zero())
        .min_by(|a, b| a.total_interest.cmp(&b.total_interest))
        .map(|l| l.name.clone());

    let output = LoanComparisonOutput {
        loans,
        metrics,
        outstanding_timeline,
        lowest_total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-loan EMI comparison with closed-form outstanding balance",
        input,
        warnings,
        elapsed,
        output,
    ))
}
