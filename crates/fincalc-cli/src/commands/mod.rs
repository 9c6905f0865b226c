pub mod credit_score;
pub mod deposits;
pub mod loans;
pub mod tax;

use clap::ValueEnum;
use fincalc_core::DurationUnit;
use serde::de::DeserializeOwned;

use crate::input;

/// Typed input from `--input <file>`, else piped stdin. `None` means the
/// caller should build the input from flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(input::file::read_json(path)?)),
        None => input::stdin::read_stdin(),
    }
}

/// Unit a `--tenure` / `--duration` flag is given in.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum UnitArg {
    #[default]
    Years,
    Months,
}

impl From<UnitArg> for DurationUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Years => DurationUnit::Years,
            UnitArg::Months => DurationUnit::Months,
        }
    }
}
