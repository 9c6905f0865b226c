use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::deposits::fd::{self, Compounding, FdInput};
use fincalc_core::deposits::ppf::{self, PpfInput};
use fincalc_core::deposits::rd::{self, RdInput};
use fincalc_core::deposits::sip::{self, SipInput};
use fincalc_core::CalculatorConfig;

use super::{read_input, UnitArg};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CompoundingArg {
    /// Monthly payout (simple interest)
    Monthly,
    /// Quarterly compounding
    Quarterly,
    /// Annual compounding, paid at maturity
    #[default]
    Cumulative,
}

impl From<CompoundingArg> for Compounding {
    fn from(arg: CompoundingArg) -> Self {
        match arg {
            CompoundingArg::Monthly => Compounding::Monthly,
            CompoundingArg::Quarterly => Compounding::Quarterly,
            CompoundingArg::Cumulative => Compounding::Cumulative,
        }
    }
}

/// Arguments for the SIP calculator
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly investment
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long, alias = "rate")]
    pub expected_return: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<Decimal>,
}

/// Arguments for the fixed deposit calculator
#[derive(Args)]
pub struct FdArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Deposit amount
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit duration
    #[arg(long)]
    pub duration: Option<Decimal>,

    /// Unit of --duration
    #[arg(long, value_enum, default_value = "years")]
    pub duration_unit: UnitArg,

    /// Interest payout / compounding mode
    #[arg(long, value_enum, default_value = "cumulative")]
    pub compounding: CompoundingArg,

    /// Investment date (YYYY-MM-DD) for the maturity date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for the recurring deposit calculator
#[derive(Args)]
pub struct RdArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly deposit
    #[arg(long)]
    pub monthly_deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of monthly instalments
    #[arg(long)]
    pub months: Option<u32>,

    /// Investment date (YYYY-MM-DD) for the maturity date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Arguments for the PPF calculator
#[derive(Args)]
pub struct PpfArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Yearly deposit
    #[arg(long)]
    pub yearly_deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, default_value = "7.1")]
    pub rate: Decimal,

    /// Account term in years (15, 20, 25 or 30)
    #[arg(long, default_value_t = 15)]
    pub years: u32,

    /// Account opening date (YYYY-MM-DD) for the maturity date
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            expected_return_pct: args
                .expected_return
                .ok_or("--expected-return is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fd_input: FdInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => FdInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            duration: args
                .duration
                .ok_or("--duration is required (or provide --input)")?,
            duration_unit: args.duration_unit.into(),
            compounding: args.compounding.into(),
            investment_date: args.start_date,
        },
    };

    let result = fd::calculate_fd(&fd_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rd(args: RdArgs, config: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let rd_input: RdInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => RdInput {
            monthly_deposit: args
                .monthly_deposit
                .ok_or("--monthly-deposit is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            months: args.months.ok_or("--months is required (or provide --input)")?,
            investment_date: args.start_date,
        },
    };

    let result = rd::calculate_rd(&rd_input, config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ppf(args: PpfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ppf_input: PpfInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => PpfInput {
            yearly_deposit: args
                .yearly_deposit
                .ok_or("--yearly-deposit is required (or provide --input)")?,
            annual_rate_pct: args.rate,
            years: args.years,
            investment_date: args.start_date,
        },
    };

    let result = ppf::calculate_ppf(&ppf_input)?;
    Ok(serde_json::to_value(result)?)
}
