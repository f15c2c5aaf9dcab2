//! Session state for displayed analysis results.
//!
//! A session owns exactly one mutable slot of currently-displayed data.
//! Fetch cycles are tokenized: a cycle begun later always outranks one
//! begun earlier, so a slow stale response can never overwrite the result
//! of a faster newer one.

use lustrum_analysis::{
    BridgeNote, DerivedMetrics, MetricsConfig, ThresholdFlag, TrendFlag,
    anomaly::{threshold, trend},
    derive_all,
};
use lustrum_core::FiscalYearRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ticket for one fetch-and-reconcile cycle, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleToken(u64);

/// Everything computed for one company in one cycle.
///
/// Derived data is never stored independently of the records it came
/// from; a snapshot is recomputed whole from a reconciled sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    /// Ticker symbol.
    pub symbol: String,
    /// Company display name, when the provider knew it.
    pub company_name: Option<String>,
    /// Reconciled fiscal-year sequence, ascending.
    pub records: Vec<FiscalYearRecord>,
    /// Derived metrics, parallel to `records`.
    pub metrics: Vec<DerivedMetrics>,
    /// Threshold flags, one list per record, parallel to `records`.
    pub threshold_flags: Vec<Vec<ThresholdFlag>>,
    /// Cross-year trend flags.
    pub trend_flags: Vec<TrendFlag>,
    /// Variance bridge notes, one per consecutive year pair.
    pub bridge_notes: Vec<BridgeNote>,
}

impl CompanySnapshot {
    /// Compute a full snapshot from a reconciled sequence.
    #[must_use]
    pub fn compute(
        symbol: impl Into<String>,
        company_name: Option<String>,
        records: Vec<FiscalYearRecord>,
        config: &MetricsConfig,
    ) -> Self {
        let metrics = derive_all(&records, config);
        let threshold_flags = threshold::evaluate(&records);
        let trend_flags = trend::evaluate(&records);
        let bridge_notes = trend::bridge_notes(&records);
        Self {
            symbol: symbol.into(),
            company_name,
            records,
            metrics,
            threshold_flags,
            trend_flags,
            bridge_notes,
        }
    }
}

/// The single mutable slot of currently-displayed data.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    last_issued: u64,
    current: Option<CompanySnapshot>,
}

impl AnalysisSession {
    /// Create an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_issued: 0,
            current: None,
        }
    }

    /// Begin a new fetch cycle, invalidating all previously issued tokens.
    pub const fn begin_cycle(&mut self) -> CycleToken {
        self.last_issued += 1;
        CycleToken(self.last_issued)
    }

    /// Install a completed cycle's snapshot.
    ///
    /// The slot is replaced only when `token` is the newest one issued;
    /// a stale token leaves the slot untouched and returns `false`.
    pub fn install(&mut self, token: CycleToken, snapshot: CompanySnapshot) -> bool {
        if token.0 != self.last_issued {
            debug!(
                stale = token.0,
                newest = self.last_issued,
                symbol = %snapshot.symbol,
                "ignoring stale cycle result"
            );
            return false;
        }
        debug!(cycle = token.0, symbol = %snapshot.symbol, "installing cycle result");
        self.current = Some(snapshot);
        true
    }

    /// The currently-displayed snapshot, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&CompanySnapshot> {
        self.current.as_ref()
    }

    /// Clear the slot without invalidating in-flight cycles.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
