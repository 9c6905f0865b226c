pub mod amortization;
pub mod calculator;
pub mod comparison;
pub mod emi;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Years};

/// Principal, annual rate (percent) and tenure (years) of an amortised loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_years: Years,
}

impl LoanTerms {
    /// One warning per non-positive term. The formulas themselves just
    /// return zero for these.
    pub fn degenerate_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.principal <= Decimal::ZERO {
            warnings.push("Principal is not positive; results are zero".into());
        }
        if self.annual_rate_pct <= Decimal::ZERO {
            warnings.push("Interest rate is not positive; results are zero".into());
        }
        if self.tenure_years <= Decimal::ZERO {
            warnings.push("Tenure is not positive; results are zero".into());
        }
        warnings
    }
}
