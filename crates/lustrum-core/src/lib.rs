//! Core data model and contracts for the Lustrum statement analyzer.
//!
//! This crate defines the pieces shared by every other Lustrum crate:
//!
//! - [`FiscalYearRecord`] and the normalized statement report types
//! - the numeric gate ([`parse_numeric`]) through which all provider data
//!   passes exactly once
//! - the [`StatementProvider`] trait implemented by provider adapters
//! - the [`LustrumError`] taxonomy for fatal cycle errors

mod error;
pub mod numeric;
mod provider;
mod types;

pub use error::{LustrumError, Result};
pub use numeric::{RawValue, parse_numeric, parse_numeric_str};
pub use provider::StatementProvider;
pub use types::{
    BalanceReport, CashFlowReport, FiscalYearRecord, IncomeReport, StatementBundle,
};
