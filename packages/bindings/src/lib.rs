use fincalc_core::CalculatorConfig;
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse an optional config document; defaults when absent.
fn parse_config(config_json: Option<String>) -> NapiResult<CalculatorConfig> {
    match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(CalculatorConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::loans::calculator::LoanCalculatorInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = fincalc_core::loans::calculator::calculate_loan(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let input: fincalc_core::loans::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = fincalc_core::loans::amortization::calculate_amortization(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_loans(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::loans::comparison::LoanComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = fincalc_core::loans::comparison::compare_loans(&input, &config)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deposits
// ---------------------------------------------------------------------------

#[napi]
pub fn fixed_deposit(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::deposits::fd::FdInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::deposits::fd::calculate_fd(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn recurring_deposit(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: fincalc_core::deposits::rd::RdInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output =
        fincalc_core::deposits::rd::calculate_rd(&input, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn public_provident_fund(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::deposits::ppf::PpfInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::deposits::ppf::calculate_ppf(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn systematic_investment_plan(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::deposits::sip::SipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::deposits::sip::calculate_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn gst(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::tax::gst::GstInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::tax::gst::calculate_gst(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Credit score
// ---------------------------------------------------------------------------

#[napi]
pub fn credit_score(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::credit_score::composite::CompositeScoreInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::credit_score::composite::calculate_credit_score(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn credit_score_impact(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::credit_score::impact::ScoreImpactInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::credit_score::impact::calculate_score_impact(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn credit_score_factors() -> NapiResult<String> {
    serde_json::to_string(&fincalc_core::credit_score::impact::default_factors())
        .map_err(to_napi_error)
}
