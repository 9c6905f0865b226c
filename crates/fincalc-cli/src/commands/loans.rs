use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use fincalc_core::loans::amortization::{calculate_amortization, schedule_page};
use fincalc_core::loans::calculator::{calculate_loan, LoanCalculatorInput, SolveFor};
use fincalc_core::loans::comparison::{compare_loans, LoanComparisonEntry, LoanComparisonInput};
use fincalc_core::loans::LoanTerms;
use fincalc_core::{CalculatorConfig, DurationUnit};

use super::{read_input, UnitArg};

/// Flags shared by the four loan solvers. Each solver requires three of
/// principal / EMI / rate / tenure.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Monthly instalment
    #[arg(long)]
    pub emi: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Unit of --tenure
    #[arg(long, value_enum, default_value = "years")]
    pub tenure_unit: UnitArg,
}

/// Arguments for the amortization schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan tenure
    #[arg(long)]
    pub tenure: Option<Decimal>,

    /// Unit of --tenure
    #[arg(long, value_enum, default_value = "years")]
    pub tenure_unit: UnitArg,

    /// Show only this page of the schedule (1-based)
    #[arg(long)]
    pub page: Option<usize>,
}

/// Arguments for loan comparison
#[derive(Args)]
pub struct CompareLoansArgs {
    /// Path to JSON input file (overrides --loan)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan as NAME,PRINCIPAL,RATE,YEARS (repeat for each loan)
    #[arg(long = "loan")]
    pub loans: Vec<String>,
}

fn tenure_in_years(args_tenure: Option<Decimal>, unit: UnitArg) -> Option<Decimal> {
    args_tenure.map(|t| DurationUnit::from(unit).to_years(t))
}

/// First flag the solver needs that was not given.
fn missing_flag(args: &LoanArgs, solve_for: SolveFor) -> Option<&'static str> {
    let checks: [(&'static str, bool); 3] = match solve_for {
        SolveFor::Emi => [
            ("--principal", args.principal.is_some()),
            ("--rate", args.rate.is_some()),
            ("--tenure", args.tenure.is_some()),
        ],
        SolveFor::LoanAmount => [
            ("--emi", args.emi.is_some()),
            ("--rate", args.rate.is_some()),
            ("--tenure", args.tenure.is_some()),
        ],
        SolveFor::InterestRate => [
            ("--emi", args.emi.is_some()),
            ("--principal", args.principal.is_some()),
            ("--tenure", args.tenure.is_some()),
        ],
        SolveFor::Tenure => [
            ("--emi", args.emi.is_some()),
            ("--principal", args.principal.is_some()),
            ("--rate", args.rate.is_some()),
        ],
    };
    checks
        .iter()
        .find(|(_, present)| !present)
        .map(|(flag, _)| *flag)
}

fn run_solver(
    args: LoanArgs,
    solve_for: SolveFor,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut loan_input: LoanCalculatorInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => {
            if let Some(flag) = missing_flag(&args, solve_for) {
                return Err(format!("{flag} is required (or provide --input)").into());
            }
            LoanCalculatorInput {
                solve_for,
                principal: args.principal,
                emi: args.emi,
                annual_rate_pct: args.rate,
                tenure_years: tenure_in_years(args.tenure, args.tenure_unit),
            }
        }
    };
    // The subcommand decides what is solved, whatever the file says
    loan_input.solve_for = solve_for;
    debug!(?solve_for, "running loan solver");

    let result = calculate_loan(&loan_input, config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_emi(args: LoanArgs, config: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    run_solver(args, SolveFor::Emi, config)
}

pub fn run_loan_amount(
    args: LoanArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    run_solver(args, SolveFor::LoanAmount, config)
}

pub fn run_interest_rate(
    args: LoanArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    run_solver(args, SolveFor::InterestRate, config)
}

pub fn run_tenure(args: LoanArgs, config: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    run_solver(args, SolveFor::Tenure, config)
}

pub fn run_amortization(
    args: AmortizationArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = match read_input(args.input.as_deref())? {
        Some(terms) => terms,
        None => LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_years: tenure_in_years(args.tenure, args.tenure_unit)
                .ok_or("--tenure is required (or provide --input)")?,
        },
    };

    let result = calculate_amortization(&terms, config)?;
    let mut value = serde_json::to_value(&result)?;
    if let Some(page) = args.page {
        let page = schedule_page(&result.result.schedule, page, config.schedule.page_size);
        value["result"]["schedule"] = serde_json::to_value(page)?;
    }
    Ok(value)
}

/// Parse `NAME,PRINCIPAL,RATE,YEARS`.
fn parse_loan_flag(flag: &str) -> Result<LoanComparisonEntry, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = flag.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("--loan '{flag}' must be NAME,PRINCIPAL,RATE,YEARS").into());
    }
    let number = |field: &str, raw: &str| -> Result<Decimal, Box<dyn std::error::Error>> {
        raw.parse::<Decimal>()
            .map_err(|e| format!("--loan '{flag}': invalid {field} '{raw}': {e}").into())
    };
    Ok(LoanComparisonEntry {
        name: parts[0].to_string(),
        terms: LoanTerms {
            principal: number("principal", parts[1])?,
            annual_rate_pct: number("rate", parts[2])?,
            tenure_years: number("years", parts[3])?,
        },
        color: None,
    })
}

pub fn run_compare_loans(
    args: CompareLoansArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison: LoanComparisonInput = match read_input(args.input.as_deref())? {
        Some(input) => input,
        None => {
            if args.loans.is_empty() {
                return Err("at least one --loan is required (or provide --input)".into());
            }
            LoanComparisonInput {
                loans: args
                    .loans
                    .iter()
                    .map(|s| parse_loan_flag(s))
                    .collect::<Result<Vec<_>, _>>()?,
            }
        }
    };

    let result = compare_loans(&comparison, config)?;
    Ok(serde_json::to_value(result)?)
}
