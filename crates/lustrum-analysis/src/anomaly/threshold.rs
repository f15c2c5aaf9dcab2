//! Fixed six-rule threshold battery.
//!
//! Every rule is evaluated against every year (no short-circuit), so a
//! single year may carry several simultaneous flags. Rule order is fixed
//! and preserved in the output. A year that triggers nothing still gets
//! one synthetic [`FlagCategory::NoMajorFlags`] row so every year has at
//! least one presentational entry.

use lustrum_core::FiscalYearRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag severity, one fixed color per rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Structural problems.
    Red,
    /// Earnings pressure.
    Orange,
    /// Cash quality watch items.
    Yellow,
    /// Growth-quality caveats.
    Purple,
    /// Informational strengths.
    Blue,
    /// The synthetic no-flags row.
    Neutral,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
            Self::Blue => "Blue",
            Self::Neutral => "-",
        };
        f.write_str(label)
    }
}

/// Rule category, one per rule in battery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    /// EBITDA margin below 10%.
    WeakOperatingMargin,
    /// PAT margin below 3%.
    ThinNetMargin,
    /// OCF below 0.7x EBITDA.
    WeakCashConversion,
    /// DSO above 120 days.
    StretchedReceivables,
    /// Revenue surge without matching profit growth.
    VolumeLedGrowth,
    /// Cash above half of equity.
    CashRichBalanceSheet,
    /// Nothing triggered for the year.
    NoMajorFlags,
}

/// One triggered rule (or the synthetic no-flags row) for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFlag {
    /// Fiscal year the flag belongs to.
    pub year: String,
    /// Which rule fired.
    pub category: FlagCategory,
    /// Severity color of the rule.
    pub severity: Severity,
    /// Short predicate description.
    pub condition: String,
    /// Analyst-facing reading of the flag.
    pub interpretation: String,
}

impl ThresholdFlag {
    fn new(
        year: &str,
        category: FlagCategory,
        severity: Severity,
        condition: &'static str,
        interpretation: &'static str,
    ) -> Self {
        Self {
            year: year.to_string(),
            category,
            severity,
            condition: condition.to_string(),
            interpretation: interpretation.to_string(),
        }
    }
}

/// Evaluate the battery for every year of an ascending sequence.
///
/// Output is one flag list per input record, in the same order. Metrics
/// needed by the rules are recomputed from the records directly, so the
/// detector has no dependency on the metrics engine's configuration.
#[must_use]
pub fn evaluate(records: &[FiscalYearRecord]) -> Vec<Vec<ThresholdFlag>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let prev = i.checked_sub(1).map(|j| &records[j]);
            evaluate_year(record, prev)
        })
        .collect()
}

/// Evaluate the battery for one year.
#[must_use]
pub fn evaluate_year(
    record: &FiscalYearRecord,
    prev: Option<&FiscalYearRecord>,
) -> Vec<ThresholdFlag> {
    let mut flags = Vec::new();

    if let (Some(revenue), Some(ebitda)) = (record.revenue, record.ebitda)
        && revenue > 0.0
        && ebitda / revenue < 0.10
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::WeakOperatingMargin,
            Severity::Red,
            "EBITDA margin < 10%",
            "Operating profitability is structurally weak; investigate pricing, input costs and overheads.",
        ));
    }

    if let (Some(revenue), Some(pat)) = (record.revenue, record.pat)
        && revenue > 0.0
        && pat / revenue < 0.03
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::ThinNetMargin,
            Severity::Orange,
            "PAT margin < 3%",
            "Net profitability is thin; tax, interest or exceptional items may be depressing earnings.",
        ));
    }

    if let (Some(ebitda), Some(ocf)) = (record.ebitda, record.ocf)
        && ebitda > 0.0
        && ocf / ebitda < 0.7
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::WeakCashConversion,
            Severity::Yellow,
            "Cash conversion < 0.7x",
            "Accrual profits are not translating into cash; monitor working capital and provisions closely.",
        ));
    }

    if let (Some(revenue), Some(ar)) = (record.revenue, record.ar)
        && revenue > 0.0
        && (ar / revenue) * 365.0 > 120.0
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::StretchedReceivables,
            Severity::Red,
            "DSO > 120 days",
            "Receivable cycle is stretched; collection risk and customer quality need deeper review.",
        ));
    }

    if let Some(prev) = prev
        && let (Some(prev_revenue), Some(revenue), Some(prev_pat), Some(pat)) =
            (prev.revenue, record.revenue, prev.pat, record.pat)
        && prev_revenue > 0.0
        && (revenue - prev_revenue) / prev_revenue > 0.25
        && prev_pat > 0.0
        && (pat - prev_pat) / prev_pat < 0.05
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::VolumeLedGrowth,
            Severity::Purple,
            "Revenue jumps but PAT lags",
            "Growth appears volume-led with limited profit conversion; review mix, discounts and execution risks.",
        ));
    }

    if let (Some(cash), Some(equity)) = (record.cash, record.equity)
        && equity > 0.0
        && cash / equity > 0.5
    {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::CashRichBalanceSheet,
            Severity::Blue,
            "Cash/Equity > 0.5x",
            "Balance sheet is cash rich; management has scope for dividends, buybacks or reinvestment.",
        ));
    }

    if flags.is_empty() {
        flags.push(ThresholdFlag::new(
            &record.year,
            FlagCategory::NoMajorFlags,
            Severity::Neutral,
            "No major flags",
            "Financial profile looks broadly balanced for this year.",
        ));
    }

    flags
}
