use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::credit_score::composite::{self, CompositeScoreInput};
use fincalc_core::credit_score::impact::{self, ScoreImpactInput};

use super::read_input;

/// Arguments for the composite credit score estimate
#[derive(Args)]
pub struct CreditScoreArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// On-time payments in percent
    #[arg(long, default_value = "100")]
    pub payment_history: Decimal,

    /// Total credit limit across accounts
    #[arg(long)]
    pub credit_limit: Option<Decimal>,

    /// Credit currently used
    #[arg(long)]
    pub credit_used: Option<Decimal>,

    /// Average age of accounts in months
    #[arg(long, default_value = "36")]
    pub credit_age_months: Decimal,

    /// Credit mix rating from 0 to 10
    #[arg(long, default_value = "8")]
    pub credit_mix: Decimal,

    /// Hard inquiries in the last two years
    #[arg(long, default_value_t = 0)]
    pub inquiries: u32,
}

/// Arguments for the score impact simulator
#[derive(Args)]
pub struct ScoreImpactArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Current credit score
    #[arg(long)]
    pub current_score: Option<u32>,

    /// Factor id to apply (repeatable), e.g. --select bankruptcy
    #[arg(long = "select")]
    pub selected: Vec<String>,

    /// Print the factor catalogue and exit
    #[arg(long)]
    pub list_factors: bool,
}

pub fn run_credit_score(args: CreditScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let score_input: CompositeScoreInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => CompositeScoreInput {
            payment_history_pct: args.payment_history,
            total_credit_limit: args
                .credit_limit
                .ok_or("--credit-limit is required (or provide --input)")?,
            credit_used: args
                .credit_used
                .ok_or("--credit-used is required (or provide --input)")?,
            credit_age_months: args.credit_age_months,
            credit_mix_score: args.credit_mix,
            hard_inquiries: args.inquiries,
        },
    };

    let result = composite::calculate_credit_score(&score_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_score_impact(args: ScoreImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.list_factors {
        return Ok(serde_json::to_value(impact::default_factors())?);
    }

    let impact_input: ScoreImpactInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => ScoreImpactInput {
            current_score: args
                .current_score
                .ok_or("--current-score is required (or provide --input)")?,
            factors: None,
            toggle: args.selected,
        },
    };

    let result = impact::calculate_score_impact(&impact_input)?;
    Ok(serde_json::to_value(result)?)
}
