use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed as percentages (8.5 = 8.5%), the way the
/// calculators take them. Conversion to a periodic decimal rate happens
/// inside each formula.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Unit a deposit duration is entered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    #[default]
    Years,
    Months,
}

impl DurationUnit {
    /// Convert a duration in this unit into years.
    pub fn to_years(self, duration: Decimal) -> Years {
        match self {
            DurationUnit::Years => duration,
            DurationUnit::Months => duration / Decimal::from(12),
        }
    }
}

/// One named value inside a chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesValue {
    pub name: String,
    pub value: Money,
}

/// A labelled point of one or more named series. Points are produced in
/// chronological order and the order of `series` is the legend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub series: Vec<SeriesValue>,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            series: Vec::new(),
        }
    }

    /// Builder-style append of a named value.
    pub fn with(mut self, name: &str, value: Money) -> Self {
        self.series.push(SeriesValue {
            name: name.to_string(),
            value,
        });
        self
    }

    /// Look up a series value by name.
    pub fn value(&self, name: &str) -> Option<Money> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_months_to_years() {
        assert_eq!(DurationUnit::Months.to_years(dec!(18)), dec!(1.5));
        assert_eq!(DurationUnit::Years.to_years(dec!(3)), dec!(3));
    }

    #[test]
    fn test_chart_point_lookup() {
        let point = ChartPoint::new("Year 1")
            .with("Principal", dec!(1000))
            .with("Interest", dec!(70));
        assert_eq!(point.value("Interest"), Some(dec!(70)));
        assert_eq!(point.value("Missing"), None);
        assert_eq!(point.series[0].name, "Principal");
    }
}
