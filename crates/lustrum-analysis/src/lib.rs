//! Analysis pipeline for Lustrum: year reconciliation, derived metrics,
//! and anomaly detection.
//!
//! The stages are strictly layered. [`reconcile`] turns a provider
//! [`StatementBundle`](lustrum_core::StatementBundle) into the canonical
//! five-year sequence; [`metrics`] derives ratios from that sequence; the
//! [`anomaly`] detectors evaluate the sequence independently of each other.
//! Everything past reconciliation is pure and recomputable on demand.

pub mod anomaly;
pub mod metrics;
pub mod reconcile;

pub use anomaly::{BridgeNote, FlagCategory, Severity, ThresholdFlag, TrendCategory, TrendFlag};
pub use metrics::{CashConversionBasis, DerivedMetrics, MetricsConfig, derive, derive_all};
pub use reconcile::reconcile;
