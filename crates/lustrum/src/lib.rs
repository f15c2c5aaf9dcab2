#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/lustrum-labs/lustrum/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # lustrum
//!
//! Five-year financial statement aggregation and anomaly screening.
//!
//! lustrum is an umbrella crate that re-exports all lustrum sub-crates for
//! convenience. It provides a unified API for fetching annual statements,
//! reconciling them into the canonical five-year sequence, deriving ratios
//! and screening for anomalies.
//!
//! ## Pipeline
//!
//! 1. **Adapters** fetch the three statement types plus the company profile
//!    for one symbol, concurrently, and normalize field names
//! 2. **Reconciler** merges the reports by fiscal year into at most five
//!    ascending [`FiscalYearRecord`]s
//! 3. **Metrics engine** derives ratios, each undefined when inputs are
//!    missing or a divisor is zero
//! 4. **Detectors** run the six-rule threshold battery and the cross-year
//!    trend pass, independently
//! 5. **Report layer** renders tables, exports CSV/JSON, and guards the
//!    displayed slot against stale fetch cycles

/// Version information for the lustrum crate.
///
/// This constant contains the current version of lustrum as specified in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Data Model
// ============================================================================

/// Canonical data model, numeric gate, error taxonomy and provider trait.
///
/// - [`FiscalYearRecord`] - the per-year normalized financial snapshot
/// - [`StatementBundle`] - one provider fetch cycle's raw reports
/// - [`StatementProvider`] - the async adapter contract
/// - [`parse_numeric`](core::parse_numeric) - the single numeric gate
pub mod core {
    pub use lustrum_core::*;
}

// Re-export the core model at top level for convenience
pub use lustrum_core::{
    FiscalYearRecord, LustrumError, RawValue, Result, StatementBundle, StatementProvider,
};

// ============================================================================
// Provider Adapters
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
///
/// ## Example
///
/// ```ignore
/// use lustrum::fmp::FmpClient;
/// use lustrum::StatementProvider;
///
/// let client = FmpClient::from_env()?;
/// let bundle = client.statements("AAPL").await?;
/// ```
pub mod fmp {
    pub use lustrum_fmp::*;
}

/// Alpha Vantage API client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://www.alphavantage.co/support/#api-key>
/// 2. Set the `ALPHAVANTAGE_API_KEY` environment variable or add to `.env`
///
/// Alpha Vantage encodes every figure as a string (`"None"` when absent);
/// the adapter passes those through untouched and the numeric gate resolves
/// them during reconciliation.
pub mod av {
    pub use lustrum_av::*;
}

// ============================================================================
// Analysis
// ============================================================================

/// Year reconciliation, derived metrics and anomaly detection.
///
/// ## Key Components
///
/// - [`reconcile`](analysis::reconcile) - merge a statement bundle into the
///   canonical ascending five-year sequence
/// - [`derive_all`](analysis::derive_all) - per-year ratios with explicit
///   missing-value semantics
/// - [`anomaly::threshold`](analysis::anomaly::threshold) - the fixed
///   six-rule battery with severity colors
/// - [`anomaly::trend`](analysis::anomaly::trend) - the cross-year
///   qualitative pass and variance bridge notes
pub mod analysis {
    pub use lustrum_analysis::*;
}

pub use lustrum_analysis::{CashConversionBasis, MetricsConfig};

// ============================================================================
// Reporting
// ============================================================================

/// Presentation layer: session state, text tables, CSV/JSON export.
///
/// ## Key Components
///
/// - [`AnalysisSession`](report::AnalysisSession) - the single displayed
///   slot with stale-cycle protection
/// - [`CompanySnapshot`](report::CompanySnapshot) - records, metrics and
///   flags computed whole from one reconciled sequence
/// - [`table`](report::table) - fixed-column text renderings
/// - [`export`](report::export) - CSV (fixed header order) and JSON
pub mod report {
    pub use lustrum_report::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use lustrum::prelude::*;
/// ```
///
/// This brings into scope:
/// - Core types: [`FiscalYearRecord`], [`StatementBundle`], [`RawValue`]
/// - The adapter contract: [`StatementProvider`]
/// - Analysis entry points: [`reconcile`](analysis::reconcile),
///   [`derive_all`](analysis::derive_all), [`MetricsConfig`]
/// - Error types: [`Result`], [`LustrumError`]
pub mod prelude {
    pub use crate::analysis::{
        CashConversionBasis, DerivedMetrics, MetricsConfig, derive_all, reconcile,
    };
    pub use crate::report::{AnalysisSession, CompanySnapshot};
    pub use crate::{
        FiscalYearRecord, LustrumError, RawValue, Result, StatementBundle, StatementProvider,
    };
}

// ============================================================================
// Tests
// ============================================================================
