pub mod bisection;
pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "deposits")]
pub mod deposits;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "credit_score")]
pub mod credit_score;

pub use config::CalculatorConfig;
pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
