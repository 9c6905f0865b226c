use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::credit_score::{categorize, clamp_score, ScoreCategory, MAX_SCORE, MIN_SCORE};
use crate::error::FinCalcError;
use crate::types::*;
use crate::FinCalcResult;

/// A discrete credit event with a fixed signed point impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditFactor {
    pub id: String,
    pub name: String,
    pub impact: i32,
    #[serde(default)]
    pub selected: bool,
}

impl CreditFactor {
    fn new(id: &str, name: &str, impact: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            impact,
            selected: false,
        }
    }
}

/// The stock catalogue, none selected.
pub fn default_factors() -> Vec<CreditFactor> {
    vec![
        CreditFactor::new("late_payment", "Late Payment", -50),
        CreditFactor::new("credit_inquiry", "Credit Inquiry", -10),
        CreditFactor::new("new_credit_card", "New Credit Card", -25),
        CreditFactor::new("loan_application", "Loan Application", -20),
        CreditFactor::new("debt_settlement", "Debt Settlement", -45),
        CreditFactor::new("bankruptcy", "Bankruptcy", -150),
        CreditFactor::new("on_time_payments", "Consistent On-Time Payments", 30),
        CreditFactor::new("credit_limit_increase", "Credit Limit Increase", 15),
        CreditFactor::new("pay_down_debt", "Pay Down Debt", 40),
        CreditFactor::new("old_account", "Keep Old Accounts Open", 25),
    ]
}

/// Flip the selection of the factor with `id`.
pub fn toggle_factor(factors: &mut [CreditFactor], id: &str) -> FinCalcResult<()> {
    let factor = factors
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| FinCalcError::InvalidInput {
            field: "factor_id".into(),
            reason: format!("unknown credit factor '{id}'"),
        })?;
    factor.selected = !factor.selected;
    Ok(())
}

pub fn reset_factors(factors: &mut [CreditFactor]) {
    for factor in factors.iter_mut() {
        factor.selected = false;
    }
}

/// `clamp(current + Σ selected impacts, 300, 850)`.
pub fn project_score(current_score: u32, factors: &[CreditFactor]) -> u32 {
    let delta: i64 = factors
        .iter()
        .filter(|f| f.selected)
        .map(|f| f.impact as i64)
        .sum();
    clamp_score(current_score as i64 + delta)
}

/// Selected factors as absolute bar heights with a direction flag.
pub fn impact_chart(factors: &[CreditFactor]) -> Vec<ImpactBar> {
    factors
        .iter()
        .filter(|f| f.selected)
        .map(|f| ImpactBar {
            name: f.name.clone(),
            score_impact: f.impact.unsigned_abs(),
            is_positive: f.impact > 0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreImpactInput {
    pub current_score: u32,
    /// Catalogue with selection state; the stock catalogue when omitted.
    #[serde(default)]
    pub factors: Option<Vec<CreditFactor>>,
    /// Ids to toggle on top of `factors`.
    #[serde(default)]
    pub toggle: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactBar {
    pub name: String,
    pub score_impact: u32,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreImpactOutput {
    pub current_score: u32,
    pub current_category: ScoreCategory,
    pub projected_score: u32,
    pub projected_category: ScoreCategory,
    pub net_change: i64,
    pub factors: Vec<CreditFactor>,
    pub chart: Vec<ImpactBar>,
}

pub fn calculate_score_impact(
    input: &ScoreImpactInput,
) -> FinCalcResult<ComputationOutput<ScoreImpactOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut factors = input.factors.clone().unwrap_or_else(default_factors);
    for id in &input.toggle {
        toggle_factor(&mut factors, id)?;
    }

    if !(MIN_SCORE..=MAX_SCORE).contains(&input.current_score) {
        warnings.push(format!(
            "Current score {} is outside {MIN_SCORE}-{MAX_SCORE}",
            input.current_score
        ));
    }

    let projected_score = project_score(input.current_score, &factors);
    let output = ScoreImpactOutput {
        current_score: input.current_score,
        current_category: categorize(input.current_score),
        projected_score,
        projected_category: categorize(projected_score),
        net_change: projected_score as i64 - input.current_score as i64,
        chart: impact_chart(&factors),
        factors,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Credit score impact: sum of selected event deltas, clamped to 300-850 (estimate)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
