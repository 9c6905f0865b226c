use fincalc_core::config::SolverConfig;
use fincalc_core::loans::amortization::{build_amortization_schedule, calculate_amortization};
use fincalc_core::loans::calculator::{calculate_loan, LoanCalculatorInput, SolveFor, TenureBreakdown};
use fincalc_core::loans::comparison::{compare_loans, LoanComparisonEntry, LoanComparisonInput};
use fincalc_core::loans::emi::{
    compute_emi, loan_amount_from_emi, rate_from_emi, solve_rate, solve_tenure, tenure_from_emi,
};
use fincalc_core::loans::LoanTerms;
use fincalc_core::{CalculatorConfig, FinCalcError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI and inverse solvers
// ===========================================================================

#[test]
fn test_home_loan_emi() {
    // 10 lakh at 8.5% over 5 years ~ 20,516.47
    let emi = compute_emi(dec!(1_000_000), dec!(8.5), dec!(5));
    assert!((emi - dec!(20_516.47)).abs() < dec!(0.01), "emi = {emi}");
}

#[test]
fn test_loan_amount_inverts_emi() {
    let emi = compute_emi(dec!(1_000_000), dec!(8.5), dec!(5));
    let principal = loan_amount_from_emi(emi, dec!(8.5), dec!(5));
    assert!(
        (principal - dec!(1_000_000)).abs() < dec!(0.01),
        "principal = {principal}"
    );
}

#[test]
fn test_rate_solver_reproduces_emi() {
    let emi = compute_emi(dec!(1_000_000), dec!(8.5), dec!(5));
    let rate = rate_from_emi(emi, dec!(1_000_000), dec!(5));
    assert!((rate - dec!(8.5)).abs() <= dec!(0.01), "rate = {rate}");

    let solved = solve_rate(emi, dec!(1_000_000), dec!(5), &SolverConfig::default()).unwrap();
    assert!(solved.converged);
    let reproduced = compute_emi(dec!(1_000_000), solved.value, dec!(5));
    assert!((reproduced - emi).abs() < dec!(0.01), "reproduced = {reproduced}");
}

#[test]
fn test_tenure_solver_recovers_tenure() {
    let emi = compute_emi(dec!(500_000), dec!(10), dec!(7));
    let tenure = tenure_from_emi(emi, dec!(500_000), dec!(10));
    assert!((tenure - dec!(7)).abs() <= dec!(0.01), "tenure = {tenure}");
}

#[test]
fn test_solvers_stay_within_iteration_cap() {
    let config = SolverConfig::default();
    let emi = compute_emi(dec!(250_000), dec!(13.25), dec!(3));

    let rate = solve_rate(emi, dec!(250_000), dec!(3), &config).unwrap();
    assert!(rate.iterations <= config.max_iterations);
    assert!(rate.converged);

    let tenure = solve_tenure(emi, dec!(250_000), dec!(13.25), &config).unwrap();
    assert!(tenure.iterations <= config.max_iterations);
    assert!(tenure.converged);
}

#[test]
fn test_solver_returns_best_estimate_when_capped() {
    let config = SolverConfig {
        tolerance: dec!(0.0000001),
        max_iterations: 5,
        ..SolverConfig::default()
    };
    let emi = compute_emi(dec!(250_000), dec!(13.25), dec!(3));
    let out = solve_rate(emi, dec!(250_000), dec!(3), &config).unwrap();
    assert_eq!(out.iterations, 5);
    assert!(!out.converged);
    assert!(out.value > Decimal::ZERO && out.value < dec!(100));
}

#[test]
fn test_unreachable_emi_pins_to_bracket_edge() {
    // EMI below the interest-free payment has no solution in the bracket
    let out = solve_rate(dec!(1), dec!(100_000), dec!(5), &SolverConfig::default()).unwrap();
    assert!(!out.converged);
    assert!(out.value < dec!(0.0001));
}

#[test]
fn test_degenerate_emi_inputs() {
    assert_eq!(compute_emi(dec!(0), dec!(8.5), dec!(5)), Decimal::ZERO);
    assert_eq!(compute_emi(dec!(100_000), dec!(0), dec!(5)), Decimal::ZERO);
    assert_eq!(compute_emi(dec!(100_000), dec!(8.5), dec!(0)), Decimal::ZERO);
    assert_eq!(rate_from_emi(dec!(0), dec!(100_000), dec!(5)), Decimal::ZERO);
    assert_eq!(tenure_from_emi(dec!(2000), dec!(100_000), dec!(0)), Decimal::ZERO);
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_schedule_properties() {
    let principal = dec!(750_000);
    let schedule = build_amortization_schedule(principal, dec!(9.25), dec!(4));
    assert_eq!(schedule.len(), 48);

    let principal_paid: Decimal = schedule.iter().map(|e| e.principal_component).sum();
    assert!((principal_paid - principal).abs() < dec!(0.01));

    assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    for pair in schedule.windows(2) {
        assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
        assert!(pair[1].interest_component <= pair[0].interest_component);
    }
}

#[test]
fn test_fractional_tenure_schedule_length() {
    // 2.5 years => 30 months exactly; 2.55 years => 30.6 months => 31 rows
    assert_eq!(
        build_amortization_schedule(dec!(100_000), dec!(9), dec!(2.5)).len(),
        30
    );
    let rows = build_amortization_schedule(dec!(100_000), dec!(9), dec!(2.55));
    assert!(rows.len() <= 31);
    assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_calculate_amortization_totals() {
    let terms = LoanTerms {
        principal: dec!(300_000),
        annual_rate_pct: dec!(10.5),
        tenure_years: dec!(3),
    };
    let out = calculate_amortization(&terms, &CalculatorConfig::default()).unwrap();
    let r = &out.result;
    assert_eq!(r.schedule.len(), 36);
    assert!((r.total_payment - r.total_interest - dec!(300_000)).abs() < dec!(0.01));
    assert!(!r.chart.is_empty());
    assert_eq!(r.chart.last().unwrap().label, "Month 36");
    assert!(out.warnings.is_empty());
}

#[test]
fn test_calculate_amortization_degenerate_warns() {
    let terms = LoanTerms {
        principal: dec!(300_000),
        annual_rate_pct: dec!(0),
        tenure_years: dec!(3),
    };
    let out = calculate_amortization(&terms, &CalculatorConfig::default()).unwrap();
    assert!(out.result.schedule.is_empty());
    assert_eq!(out.result.emi, Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

// ===========================================================================
// Loan calculator envelope
// ===========================================================================

fn loan_input(solve_for: SolveFor) -> LoanCalculatorInput {
    LoanCalculatorInput {
        solve_for,
        principal: Some(dec!(1_000_000)),
        emi: Some(compute_emi(dec!(1_000_000), dec!(8.5), dec!(5))),
        annual_rate_pct: Some(dec!(8.5)),
        tenure_years: Some(dec!(5)),
    }
}

#[test]
fn test_calculate_loan_each_mode() {
    let config = CalculatorConfig::default();

    let emi = calculate_loan(&loan_input(SolveFor::Emi), &config).unwrap();
    let amount = calculate_loan(&loan_input(SolveFor::LoanAmount), &config).unwrap();
    let rate = calculate_loan(&loan_input(SolveFor::InterestRate), &config).unwrap();
    let tenure = calculate_loan(&loan_input(SolveFor::Tenure), &config).unwrap();

    assert!((amount.result.solved_value - dec!(1_000_000)).abs() < dec!(0.01));
    assert_eq!(rate.result.solved_value, dec!(8.5));
    assert_eq!(tenure.result.solved_value, dec!(5));
    assert_eq!(
        tenure.result.tenure_breakdown,
        Some(TenureBreakdown {
            years: 5,
            months: 0
        })
    );
    assert!(rate.result.solver.is_some());
    assert_eq!(emi.result.total_payment, emi.result.emi * dec!(60));
    assert_eq!(emi.result.schedule_preview.as_ref().unwrap().entries.len(), 12);
}

#[test]
fn test_calculate_loan_missing_field() {
    let input = LoanCalculatorInput {
        tenure_years: None,
        ..loan_input(SolveFor::Emi)
    };
    let err = calculate_loan(&input, &CalculatorConfig::default()).unwrap_err();
    match err {
        FinCalcError::InvalidInput { field, .. } => assert_eq!(field, "tenure_years"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_calculate_loan_rejects_bad_config() {
    let mut config = CalculatorConfig::default();
    config.solver.max_iterations = 0;
    let err = calculate_loan(&loan_input(SolveFor::Emi), &config).unwrap_err();
    assert!(matches!(err, FinCalcError::InvalidConfig { .. }));
}

// ===========================================================================
// Comparison
// ===========================================================================

fn entry(name: &str, principal: Decimal, rate: Decimal, years: Decimal) -> LoanComparisonEntry {
    LoanComparisonEntry {
        name: name.into(),
        terms: LoanTerms {
            principal,
            annual_rate_pct: rate,
            tenure_years: years,
        },
        color: None,
    }
}

#[test]
fn test_compare_two_loans() {
    let input = LoanComparisonInput {
        loans: vec![
            entry("Bank A", dec!(1_000_000), dec!(8.5), dec!(5)),
            entry("Bank B", dec!(1_000_000), dec!(9.5), dec!(3)),
        ],
    };
    let out = compare_loans(&input, &CalculatorConfig::default()).unwrap();
    let r = &out.result;

    assert!(out.warnings.is_empty());
    assert_eq!(r.loans[0].color, "#8B5CF6");
    assert_eq!(r.loans[1].color, "#3B82F6");
    // Shorter tenure wins on interest despite the higher rate
    assert_eq!(r.lowest_total_interest.as_deref(), Some("Bank B"));

    // 0, 6, ..., 60
    assert_eq!(r.outstanding_timeline.len(), 11);
    let start = &r.outstanding_timeline[0];
    assert_eq!(start.label, "Start");
    assert_eq!(start.value("Bank A"), Some(dec!(1_000_000)));
    let month_42 = &r.outstanding_timeline[7];
    assert_eq!(month_42.label, "42 mo");
    assert_eq!(month_42.value("Bank B"), Some(Decimal::ZERO));
    assert!(month_42.value("Bank A").unwrap() > Decimal::ZERO);
    assert_eq!(r.outstanding_timeline[10].value("Bank A"), Some(Decimal::ZERO));

    assert_eq!(r.metrics.len(), 3);
    assert_eq!(r.metrics[0].value("Bank A"), Some(r.loans[0].emi));
}

#[test]
fn test_compare_outside_range_warns() {
    let input = LoanComparisonInput {
        loans: vec![entry("Solo", dec!(500_000), dec!(9), dec!(5))],
    };
    let out = compare_loans(&input, &CalculatorConfig::default()).unwrap();
    assert_eq!(out.warnings.len(), 1);

    let empty = LoanComparisonInput { loans: vec![] };
    assert!(matches!(
        compare_loans(&empty, &CalculatorConfig::default()),
        Err(FinCalcError::InsufficientData(_))
    ));
}
