use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::time_value::round_to;
use crate::types::{DurationUnit, Years};

/// Add a whole number of years or months to an investment date.
///
/// Month-end dates clamp (31 Jan + 1 month = 28/29 Feb). `None` when the
/// result falls outside chrono's date range.
pub fn maturity_date(start: NaiveDate, duration: u32, unit: DurationUnit) -> Option<NaiveDate> {
    let months = match unit {
        DurationUnit::Years => duration.checked_mul(12)?,
        DurationUnit::Months => duration,
    };
    start.checked_add_months(Months::new(months))
}

/// Maturity date for a possibly fractional duration in years, rounded to
/// the nearest whole month.
pub fn maturity_date_for_years(start: NaiveDate, years: Years) -> Option<NaiveDate> {
    if years < Decimal::ZERO {
        return None;
    }
    let months = round_to(years * Decimal::from(12), 0).to_u32()?;
    maturity_date(start, months, DurationUnit::Months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_years_and_months() {
        let start = date(2024, 4, 15);
        assert_eq!(
            maturity_date(start, 5, DurationUnit::Years),
            Some(date(2029, 4, 15))
        );
        assert_eq!(
            maturity_date(start, 36, DurationUnit::Months),
            Some(date(2027, 4, 15))
        );
    }

    #[test]
    fn test_month_end_clamps() {
        assert_eq!(
            maturity_date(date(2024, 1, 31), 1, DurationUnit::Months),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_fractional_years() {
        assert_eq!(
            maturity_date_for_years(date(2024, 1, 1), dec!(1.5)),
            Some(date(2025, 7, 1))
        );
    }
}
