//! Presentation layer for Lustrum.
//!
//! Owns the session slot of currently-displayed data, the plain-text
//! table renderings, and the CSV/JSON export surface. Everything here
//! consumes the analysis output read-only; no derived data originates
//! in this crate.

pub mod export;
pub mod session;
pub mod table;

pub use export::{ExportError, ExportFormat, export_to_string, write_csv, write_json};
pub use session::{AnalysisSession, CompanySnapshot, CycleToken};
