//! Provider contract for fetching financial statements.

use crate::{Result, StatementBundle};
use async_trait::async_trait;
use std::fmt::Debug;

/// A source of annual financial statements for a ticker symbol.
///
/// Implementations fetch the income statement, balance sheet, and cash flow
/// reports for a symbol, normalize provider-native field names, and return
/// them as one [`StatementBundle`]. The three statement fetches are issued
/// concurrently and awaited jointly: a failure in any one of them fails the
/// whole call (no partial-provider degradation).
#[async_trait]
pub trait StatementProvider: Send + Sync + Debug {
    /// Provider name for display and logging (e.g. `"Financial Modeling Prep"`).
    fn name(&self) -> &str;

    /// Fetch the annual statements for `symbol`, newest-first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LustrumError::Transport`] when any statement fetch
    /// fails at the HTTP or decoding level.
    async fn statements(&self, symbol: &str) -> Result<StatementBundle>;
}
