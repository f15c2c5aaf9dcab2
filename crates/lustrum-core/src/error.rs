//! Error types for the Lustrum pipeline.
//!
//! Per-field parse failures are deliberately absent from this taxonomy:
//! they resolve to a missing value at the numeric gate and never propagate.

use thiserror::Error;

/// Fatal errors surfaced by a fetch-and-reconcile cycle.
#[derive(Debug, Error)]
pub enum LustrumError {
    /// All three source statement arrays were empty for the symbol.
    #[error("no data available for {0}")]
    NoData(String),

    /// Source data existed, but no report carried a parseable fiscal year.
    ///
    /// Distinct from [`LustrumError::NoData`] so a caller can tell
    /// "provider returned nothing" from "provider returned garbage".
    #[error("data for {0} could not be mapped to any fiscal year")]
    UnmappableData(String),

    /// A provider-level fetch failed (HTTP, decoding, missing credentials).
    #[error("transport error: {0}")]
    Transport(String),
}

/// A specialized Result type for Lustrum operations.
pub type Result<T> = std::result::Result<T, LustrumError>;
