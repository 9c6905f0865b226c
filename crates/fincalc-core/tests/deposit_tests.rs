use chrono::NaiveDate;
use fincalc_core::deposits::fd::{calculate_fd, compute_fd, Compounding, FdInput};
use fincalc_core::deposits::ppf::{calculate_ppf, compute_ppf, PpfInput};
use fincalc_core::deposits::rd::{calculate_rd, compute_rd, RdInput};
use fincalc_core::deposits::sip::{calculate_sip, compute_sip, SipInput};
use fincalc_core::time_value::{annuity_future_value, monthly_rate};
use fincalc_core::{CalculatorConfig, DurationUnit};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixed deposit
// ===========================================================================

#[test]
fn test_fd_one_year_cumulative() {
    assert_eq!(
        compute_fd(dec!(1000), dec!(10), dec!(1), Compounding::Cumulative),
        dec!(1100)
    );
}

#[test]
fn test_fd_two_years_cumulative() {
    assert_eq!(
        compute_fd(dec!(1000), dec!(10), dec!(2), Compounding::Cumulative),
        dec!(1210)
    );
}

#[test]
fn test_fd_envelope_defaults_from_json() {
    let input: FdInput = serde_json::from_str(
        r#"{"principal": "100000", "annual_rate_pct": "7", "duration": "5"}"#,
    )
    .unwrap();
    assert_eq!(input.compounding, Compounding::Cumulative);
    assert_eq!(input.duration_unit, DurationUnit::Years);

    let out = calculate_fd(&input).unwrap();
    assert_eq!(out.result.duration_years, dec!(5));
    assert_eq!(out.result.chart.len(), 5);
    assert!(out.result.maturity_date.is_none());
}

#[test]
fn test_fd_degenerate_warns() {
    let input = FdInput {
        principal: dec!(100_000),
        annual_rate_pct: dec!(0),
        duration: dec!(5),
        duration_unit: DurationUnit::Years,
        compounding: Compounding::Quarterly,
        investment_date: None,
    };
    let out = calculate_fd(&input).unwrap();
    assert_eq!(out.result.maturity_value, Decimal::ZERO);
    assert_eq!(out.result.interest_earned, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

// ===========================================================================
// Recurring deposit
// ===========================================================================

#[test]
fn test_rd_uses_quarterly_rate_on_monthly_periods() {
    // Same as an ordinary annuity at pct / 400 per month
    let direct = annuity_future_value(dec!(5000), dec!(7) / dec!(400), dec!(24)).unwrap();
    assert_eq!(compute_rd(dec!(5000), dec!(7), 24), direct);
}

#[test]
fn test_rd_envelope_with_date() {
    let input = RdInput {
        monthly_deposit: dec!(5000),
        annual_rate_pct: dec!(7),
        months: 24,
        investment_date: NaiveDate::from_ymd_opt(2025, 8, 31),
    };
    let out = calculate_rd(&input, &CalculatorConfig::default()).unwrap();
    assert_eq!(out.result.total_deposit, dec!(120_000));
    assert!(out.result.interest_earned > Decimal::ZERO);
    assert_eq!(out.result.maturity_date, NaiveDate::from_ymd_opt(2027, 8, 31));
    assert_eq!(out.result.chart.last().unwrap().label, "Month 24");
}

// ===========================================================================
// PPF
// ===========================================================================

#[test]
fn test_ppf_fifteen_years() {
    let value = compute_ppf(dec!(150_000), dec!(7.1), 15);
    // Deposit-then-interest grows each deposit for a full year
    let expected: Decimal = (1..=15u32)
        .map(|k| {
            let mut growth = Decimal::ONE;
            for _ in 0..k {
                growth *= dec!(1.071);
            }
            dec!(150_000) * growth
        })
        .sum();
    assert!((value - expected).abs() < dec!(0.0001), "value = {value}");
}

#[test]
fn test_ppf_envelope() {
    let input = PpfInput {
        yearly_deposit: dec!(150_000),
        annual_rate_pct: dec!(7.1),
        years: 15,
        investment_date: None,
    };
    let out = calculate_ppf(&input).unwrap();
    assert_eq!(out.result.total_deposit, dec!(2_250_000));
    assert_eq!(
        out.result.interest_earned,
        out.result.maturity_value - dec!(2_250_000)
    );
}

// ===========================================================================
// SIP
// ===========================================================================

#[test]
fn test_sip_is_annuity_due() {
    let ordinary = annuity_future_value(dec!(5000), monthly_rate(dec!(12)), dec!(60)).unwrap();
    let sip = compute_sip(dec!(5000), dec!(12), dec!(5));
    assert_eq!(sip, ordinary * dec!(1.01));
    assert!(sip > ordinary);
}

#[test]
fn test_sip_envelope_degenerate() {
    let input = SipInput {
        monthly_investment: dec!(5000),
        expected_return_pct: dec!(12),
        years: dec!(0),
    };
    let out = calculate_sip(&input).unwrap();
    assert_eq!(out.result.maturity_value, Decimal::ZERO);
    assert_eq!(out.result.total_investment, Decimal::ZERO);
    assert!(out.result.chart.is_empty());
    assert_eq!(out.warnings.len(), 1);
}
