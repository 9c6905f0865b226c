use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::credit_score::{categorize, clamp_score, ScoreCategory, MIN_SCORE};
use crate::time_value::round_to;
use crate::types::*;
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScoreInput {
    /// Share of payments made on time, 0-100.
    pub payment_history_pct: Percent,
    pub total_credit_limit: Money,
    pub credit_used: Money,
    pub credit_age_months: Decimal,
    /// Self-assessed diversity of account types, 0-10.
    pub credit_mix_score: Decimal,
    /// Hard inquiries in the last two years.
    pub hard_inquiries: u32,
}

/// Points contributed by each factor before the 300-850 mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorPoints {
    pub payment_history: Decimal,
    pub utilization: Decimal,
    pub credit_age: Decimal,
    pub credit_mix: Decimal,
    pub inquiries: Decimal,
}

impl FactorPoints {
    pub fn total(&self) -> Decimal {
        [self.utilization, self.credit_age, self.credit_mix, self.inquiries]
            .into_iter()
            .fold(self.payment_history, Decimal::saturating_add)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScoreOutput {
    pub score: u32,
    pub category: ScoreCategory,
    pub utilization_ratio_pct: Percent,
    pub points: FactorPoints,
    /// One point per factor: `Maximum Impact` (its weight) vs `Your Score`.
    pub factor_breakdown: Vec<ChartPoint>,
    pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Used credit as a percentage of the limit; 0 when there is no limit.
/// Saturates at the Decimal bounds when the ratio is not representable.
pub fn utilization_ratio(credit_used: Money, total_credit_limit: Money) -> Percent {
    if total_credit_limit <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    credit_used
        .checked_div(total_credit_limit)
        .and_then(|r| r.checked_mul(dec!(100)))
        .unwrap_or_else(|| {
            warn!(%credit_used, %total_credit_limit, "utilization ratio overflowed");
            if credit_used.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

pub fn factor_points(input: &CompositeScoreInput) -> FactorPoints {
    let ratio = utilization_ratio(input.credit_used, input.total_credit_limit);
    FactorPoints {
        payment_history: input.payment_history_pct.min(dec!(100)).saturating_mul(dec!(3.5)),
        utilization: dec!(100)
            .saturating_sub(ratio.saturating_mul(dec!(3)))
            .max(Decimal::ZERO)
            .saturating_mul(dec!(3)),
        credit_age: (input.credit_age_months.min(dec!(84)) / dec!(84)).saturating_mul(dec!(150)),
        credit_mix: input.credit_mix_score.saturating_mul(dec!(10)),
        inquiries: (dec!(100) - Decimal::from(input.hard_inquiries) * dec!(20)).max(Decimal::ZERO),
    }
}

/// `300 + (Σ points / 100) × 550`, rounded and clamped to [300, 850].
pub fn composite_score(input: &CompositeScoreInput) -> u32 {
    let scaled = (factor_points(input).total() / dec!(100)).saturating_mul(dec!(550));
    let raw = Decimal::from(MIN_SCORE).saturating_add(scaled);
    let rounded = round_to(raw, 0).to_i64().unwrap_or(if raw.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    });
    clamp_score(rounded)
}

/// Achieved share of each factor's weight, as displayed next to the weight.
pub fn factor_breakdown(input: &CompositeScoreInput) -> Vec<ChartPoint> {
    let ratio = utilization_ratio(input.credit_used, input.total_credit_limit);
    let rows = [
        (
            "Payment History (35%)",
            dec!(35),
            input.payment_history_pct / dec!(100) * dec!(35),
        ),
        (
            "Credit Utilization (30%)",
            dec!(30),
            dec!(30)
                .saturating_sub(ratio.saturating_mul(dec!(0.9)))
                .max(Decimal::ZERO),
        ),
        (
            "Credit Age (15%)",
            dec!(15),
            (input.credit_age_months / dec!(84) * dec!(15)).min(dec!(15)),
        ),
        (
            "Credit Mix (10%)",
            dec!(10),
            input.credit_mix_score / dec!(10) * dec!(10),
        ),
        (
            "Credit Inquiries (10%)",
            dec!(10),
            (dec!(10) - Decimal::from(input.hard_inquiries) * dec!(2)).max(Decimal::ZERO),
        ),
    ];

    rows.into_iter()
        .map(|(name, weight, achieved)| {
            ChartPoint::new(name)
                .with("Maximum Impact", weight)
                .with("Your Score", round_to(achieved, 0))
        })
        .collect()
}

pub fn recommendations(input: &CompositeScoreInput) -> Vec<String> {
    let ratio = utilization_ratio(input.credit_used, input.total_credit_limit);
    let mut tips = Vec::new();
    if input.payment_history_pct < dec!(100) {
        tips.push("Aim for 100% on-time payments to improve your payment history".to_string());
    }
    if ratio > dec!(30) {
        tips.push("Try to keep your credit utilization below 30%".to_string());
    }
    if input.credit_age_months < dec!(24) {
        tips.push(
            "Keep your oldest credit accounts open to increase average credit age".to_string(),
        );
    }
    if input.credit_mix_score < dec!(7) {
        tips.push(
            "Consider diversifying your credit mix with different types of accounts".to_string(),
        );
    }
    if input.hard_inquiries > 2 {
        tips.push(
            "Limit new credit applications to reduce the number of hard inquiries".to_string(),
        );
    }
    if tips.is_empty() {
        tips.push(
            "Your credit score is in good standing. Continue your current credit habits."
                .to_string(),
        );
    }
    tips
}

pub fn calculate_credit_score(
    input: &CompositeScoreInput,
) -> FinCalcResult<ComputationOutput<CompositeScoreOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.total_credit_limit <= Decimal::ZERO {
        warnings.push("No credit limit given; utilization treated as 0%".into());
    } else if input.credit_used > input.total_credit_limit {
        warnings.push("Credit used exceeds the total limit".into());
    }
    if input.payment_history_pct < Decimal::ZERO || input.payment_history_pct > dec!(100) {
        warnings.push("Payment history is expected between 0 and 100%".into());
    }
    if input.credit_mix_score < Decimal::ZERO || input.credit_mix_score > dec!(10) {
        warnings.push("Credit mix score is expected between 0 and 10".into());
    }

    let points = factor_points(input);
    let score = composite_score(input);
    debug!(score, total_points = %points.total(), "composite credit score");

    let output = CompositeScoreOutput {
        score,
        category: categorize(score),
        utilization_ratio_pct: utilization_ratio(input.credit_used, input.total_credit_limit),
        points,
        factor_breakdown: factor_breakdown(input),
        recommendations: recommendations(input),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted five-factor credit score estimate (heuristic, not a bureau model)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
