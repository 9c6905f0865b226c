pub mod fd;
pub mod maturity;
pub mod ppf;
pub mod rd;
pub mod sip;
