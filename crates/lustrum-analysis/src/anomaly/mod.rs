//! Anomaly detection.
//!
//! Two independent detectors: a per-year threshold battery and a
//! cross-year trend pass. They answer different questions and are kept
//! separate; neither consumes the other's output.

pub mod threshold;
pub mod trend;

pub use threshold::{FlagCategory, Severity, ThresholdFlag};
pub use trend::{BridgeNote, TrendCategory, TrendFlag};
