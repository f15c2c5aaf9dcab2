//! Financial Modeling Prep (FMP) statement adapter for Lustrum.
//!
//! This crate fetches annual income statements, balance sheets, and cash
//! flow statements from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! normalizes them into the Lustrum statement report types.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lustrum_core::StatementProvider;
//! use lustrum_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let bundle = client.statements("AAPL").await?;
//!     println!("{} income reports", bundle.income.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
