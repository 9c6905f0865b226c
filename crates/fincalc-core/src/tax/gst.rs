use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::FinCalcResult;

/// Slabs offered by the calculator. Any non-negative rate is accepted.
pub const GST_SLABS: [Decimal; 5] = [dec!(0), dec!(5), dec!(12), dec!(18), dec!(28)];

/// Whether the entered amount already contains GST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstMode {
    /// GST is added on top of a net amount.
    #[default]
    Exclusive,
    /// GST is extracted from a gross amount.
    Inclusive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GstInput {
    pub amount: Money,
    pub rate_pct: Percent,
    #[serde(default)]
    pub mode: GstMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GstBreakdown {
    pub net_amount: Money,
    pub gst_amount: Money,
    pub total_amount: Money,
    /// Central half of the GST for intra-state supplies.
    pub cgst: Money,
    /// State half of the GST for intra-state supplies.
    pub sgst: Money,
}

pub fn compute_gst(amount: Money, rate_pct: Percent, mode: GstMode) -> GstBreakdown {
    if amount <= Decimal::ZERO || rate_pct < Decimal::ZERO {
        return GstBreakdown::default();
    }
    let rate = rate_pct / dec!(100);

    let (net_amount, gst_amount, total_amount) = match mode {
        GstMode::Exclusive => {
            let gst = amount * rate;
            (amount, gst, amount + gst)
        }
        GstMode::Inclusive => {
            let net = amount / (Decimal::ONE + rate);
            (net, amount - net, amount)
        }
    };

    let half = gst_amount / dec!(2);
    GstBreakdown {
        net_amount,
        gst_amount,
        total_amount,
        cgst: half,
        sgst: half,
    }
}

pub fn calculate_gst(input: &GstInput) -> FinCalcResult<ComputationOutput<GstBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.amount <= Decimal::ZERO {
        warnings.push("Amount is not positive; all figures are zero".into());
    }
    if input.rate_pct < Decimal::ZERO {
        warnings.push("GST rate is negative; all figures are zero".into());
    } else if !GST_SLABS.contains(&input.rate_pct) {
        warnings.push(format!(
            "{}% is not a standard GST slab (0, 5, 12, 18, 28)",
            input.rate_pct
        ));
    }

    let result = compute_gst(input.amount, input.rate_pct, input.mode);

    let methodology = match input.mode {
        GstMode::Exclusive => "GST exclusive: tax added to the net amount",
        GstMode::Inclusive => "GST inclusive: tax extracted from the gross amount",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exclusive() {
        let b = compute_gst(dec!(1000), dec!(18), GstMode::Exclusive);
        assert_eq!(
            b,
            GstBreakdown {
                net_amount: dec!(1000),
                gst_amount: dec!(180),
                total_amount: dec!(1180),
                cgst: dec!(90),
                sgst: dec!(90),
            }
        );
    }

    #[test]
    fn test_inclusive() {
        let b = compute_gst(dec!(1180), dec!(18), GstMode::Inclusive);
        assert_eq!(b.net_amount, dec!(1000));
        assert_eq!(b.gst_amount, dec!(180));
        assert_eq!(b.total_amount, dec!(1180));
        assert_eq!(b.cgst + b.sgst, b.gst_amount);
    }

    #[test]
    fn test_zero_rate() {
        let b = compute_gst(dec!(500), dec!(0), GstMode::Exclusive);
        assert_eq!(b.gst_amount, Decimal::ZERO);
        assert_eq!(b.total_amount, dec!(500));
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(
            compute_gst(dec!(0), dec!(18), GstMode::Inclusive),
            GstBreakdown::default()
        );
        assert_eq!(
            compute_gst(dec!(100), dec!(-5), GstMode::Exclusive),
            GstBreakdown::default()
        );
    }

    #[test]
    fn test_calculate_gst_non_slab_warns() {
        let input = GstInput {
            amount: dec!(1000),
            rate_pct: dec!(15),
            mode: GstMode::Exclusive,
        };
        let out = calculate_gst(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.gst_amount, dec!(150));
    }
}
