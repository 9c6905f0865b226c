use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::warn;

use crate::types::{Money, Percent, Years};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Annual percentage to a monthly decimal rate: `pct / 12 / 100`.
pub fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / MONTHS_PER_YEAR / HUNDRED
}

/// Annual percentage to a quarterly decimal rate: `pct / 4 / 100`.
pub fn quarterly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / dec!(4) / HUNDRED
}

/// Annual percentage to an annual decimal rate.
pub fn annual_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / HUNDRED
}

/// Tenure in years to a (possibly fractional) month count.
pub fn months_in(tenure_years: Years) -> Decimal {
    tenure_years.saturating_mul(MONTHS_PER_YEAR)
}

/// `(1 + rate)^periods`. Fractional periods are allowed.
///
/// Returns `None` when the result does not fit in a Decimal, so callers can
/// pick their own degenerate value instead of panicking.
pub fn growth_factor(rate: Decimal, periods: Decimal) -> Option<Decimal> {
    let factor = (Decimal::ONE + rate).checked_powd(periods);
    if factor.is_none() {
        warn!(%rate, %periods, "growth factor overflowed");
    }
    factor
}

/// Future value of `payment` made at the end of each of `periods` periods
/// (ordinary annuity): `pmt × ((1+r)^n − 1) / r`.
pub fn annuity_future_value(payment: Money, rate: Decimal, periods: Decimal) -> Option<Money> {
    if rate.is_zero() {
        return Some(payment * periods);
    }
    let factor = growth_factor(rate, periods)?;
    payment
        .checked_mul(factor - Decimal::ONE)
        .and_then(|v| v.checked_div(rate))
}

/// Round half away from zero, matching how the calculators display results.
pub fn round_to(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole number of scheduled periods for a possibly fractional count.
pub fn whole_periods(periods: Decimal) -> u32 {
    if periods <= Decimal::ZERO {
        return 0;
    }
    periods.ceil().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversions() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(quarterly_rate(dec!(8)), dec!(0.02));
        assert_eq!(annual_rate(dec!(7.5)), dec!(0.075));
        assert_eq!(months_in(dec!(2.5)), dec!(30));
    }

    #[test]
    fn test_growth_factor_integer_periods_exact() {
        assert_eq!(growth_factor(dec!(0.1), dec!(2)).unwrap(), dec!(1.21));
    }

    #[test]
    fn test_growth_factor_overflow_is_none() {
        assert!(growth_factor(dec!(9), dec!(1000)).is_none());
    }

    #[test]
    fn test_annuity_future_value() {
        // 100 at end of each of 3 periods at 10%: 100 + 110 + 121 = 331
        let fv = annuity_future_value(dec!(100), dec!(0.1), dec!(3)).unwrap();
        assert_eq!(fv, dec!(331));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_to(dec!(649.5), 0), dec!(650));
    }

    #[test]
    fn test_whole_periods_rounds_up() {
        assert_eq!(whole_periods(dec!(60)), 60);
        assert_eq!(whole_periods(dec!(30.6)), 31);
        assert_eq!(whole_periods(dec!(-1)), 0);
    }
}
