//! Alpha Vantage statement adapter for Lustrum.
//!
//! This crate fetches annual financial statements from the
//! [Alpha Vantage](https://www.alphavantage.co/) fundamental-data API and
//! normalizes them into the Lustrum statement report types. Alpha Vantage
//! encodes every figure as a string (`"None"` for absent values); those
//! strings flow untouched into the reports and are resolved by the numeric
//! gate during reconciliation.
//!
//! # Environment Variables
//!
//! Set `ALPHAVANTAGE_API_KEY` in your environment or `.env` file.

mod client;
mod error;
mod types;

pub use client::AvClient;
pub use error::AvError;
pub use types::*;

/// Result type for Alpha Vantage operations.
pub type Result<T> = std::result::Result<T, AvError>;
