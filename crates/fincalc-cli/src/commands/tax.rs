use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::tax::gst::{self, GstInput, GstMode};

use super::read_input;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum GstModeArg {
    /// Amount is net; GST is added on top
    #[default]
    Exclusive,
    /// Amount already includes GST
    Inclusive,
}

impl From<GstModeArg> for GstMode {
    fn from(arg: GstModeArg) -> Self {
        match arg {
            GstModeArg::Exclusive => GstMode::Exclusive,
            GstModeArg::Inclusive => GstMode::Inclusive,
        }
    }
}

/// Arguments for the GST calculator
#[derive(Args)]
pub struct GstArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount (net for exclusive, gross for inclusive)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// GST rate in percent
    #[arg(long, default_value = "18")]
    pub rate: Decimal,

    /// Whether the amount includes GST
    #[arg(long, value_enum, default_value = "exclusive")]
    pub mode: GstModeArg,
}

pub fn run_gst(args: GstArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let gst_input: GstInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => GstInput {
            amount: args.amount.ok_or("--amount is required (or provide --input)")?,
            rate_pct: args.rate,
            mode: args.mode.into(),
        },
    };

    let result = gst::calculate_gst(&gst_input)?;
    Ok(serde_json::to_value(result)?)
}
