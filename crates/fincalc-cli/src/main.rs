mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::credit_score::{CreditScoreArgs, ScoreImpactArgs};
use commands::deposits::{FdArgs, PpfArgs, RdArgs, SipArgs};
use commands::loans::{AmortizationArgs, CompareLoansArgs, LoanArgs};
use commands::tax::GstArgs;
use fincalc_core::CalculatorConfig;

/// Personal-finance calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal-finance calculators with decimal precision",
    long_about = "A CLI for everyday personal-finance calculations with decimal precision. \
                  Supports loan EMI and its inverses, amortization schedules, loan comparison, \
                  SIP, fixed and recurring deposits, PPF, GST and credit score estimates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Calculator settings file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log solver and sampling decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly EMI from principal, rate and tenure
    Emi(LoanArgs),
    /// Loan amount an EMI can service
    LoanAmount(LoanArgs),
    /// Interest rate implied by an EMI (bisection)
    InterestRate(LoanArgs),
    /// Tenure implied by an EMI (bisection)
    Tenure(LoanArgs),
    /// Month-by-month amortization schedule
    Amortization(AmortizationArgs),
    /// Compare up to four loans side by side
    CompareLoans(CompareLoansArgs),
    /// Systematic investment plan maturity
    Sip(SipArgs),
    /// Fixed deposit maturity
    Fd(FdArgs),
    /// Recurring deposit maturity
    Rd(RdArgs),
    /// Public Provident Fund maturity
    Ppf(PpfArgs),
    /// GST exclusive / inclusive breakdown
    Gst(GstArgs),
    /// Estimate a credit score from its main factors
    CreditScore(CreditScoreArgs),
    /// Project how credit events move a score
    ScoreImpact(ScoreImpactArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fincalc=debug,fincalc_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fincalc=warn,fincalc_core=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_config(path: Option<&str>) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let config = input::file::read_config(path)?;
            tracing::debug!(path, "loaded calculator config");
            Ok(config)
        }
        None => Ok(CalculatorConfig::default()),
    }
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref()).unwrap_or_else(|e| fail(e));

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loans::run_emi(args, &config),
        Commands::LoanAmount(args) => commands::loans::run_loan_amount(args, &config),
        Commands::InterestRate(args) => commands::loans::run_interest_rate(args, &config),
        Commands::Tenure(args) => commands::loans::run_tenure(args, &config),
        Commands::Amortization(args) => commands::loans::run_amortization(args, &config),
        Commands::CompareLoans(args) => commands::loans::run_compare_loans(args, &config),
        Commands::Sip(args) => commands::deposits::run_sip(args),
        Commands::Fd(args) => commands::deposits::run_fd(args),
        Commands::Rd(args) => commands::deposits::run_rd(args, &config),
        Commands::Ppf(args) => commands::deposits::run_ppf(args),
        Commands::Gst(args) => commands::tax::run_gst(args),
        Commands::CreditScore(args) => commands::credit_score::run_credit_score(args),
        Commands::ScoreImpact(args) => commands::credit_score::run_score_impact(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
