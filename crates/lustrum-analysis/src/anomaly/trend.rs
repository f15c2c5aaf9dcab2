//! Cross-year qualitative trend pass.
//!
//! Independent of the threshold battery: these rules only look at how the
//! figures moved between consecutive years, from the second year onward.
//! A predicate that needs a missing figure simply does not fire.

use lustrum_core::FiscalYearRecord;
use serde::{Deserialize, Serialize};

/// Which trend rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendCategory {
    /// PAT rose while cash fell.
    ProfitUpCashDown,
    /// Receivables growing more than 5pp faster than revenue.
    ReceivablesOutpacingRevenue,
    /// Revenue up more than 15% with flat-or-declining EBITDA margin.
    RevenueSpikeMarginsFlat,
    /// The synthetic all-clear row when nothing fired across the sequence.
    OverallHealth,
}

/// One triggered trend rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendFlag {
    /// Fiscal year (of the later year in the pair) the flag belongs to.
    pub year: String,
    /// Which rule fired.
    pub category: TrendCategory,
    /// Short rule name.
    pub name: String,
    /// Whether the rule actually triggered (false only on the all-clear row).
    pub detected: bool,
    /// Analyst-facing reading of the flag.
    pub interpretation: String,
}

/// One qualitative note per consecutive year pair, classifying how the
/// revenue, PAT, OCF and cash deltas moved together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeNote {
    /// Fiscal year (of the later year in the pair) the note describes.
    pub year: String,
    /// Classification of the year-pair delta shape.
    pub note: String,
}

/// Evaluate the trend rules across an ascending sequence.
///
/// When no rule fires anywhere in the sequence, a single synthetic
/// all-clear flag is returned so the output is never empty for a
/// multi-year sequence.
#[must_use]
pub fn evaluate(records: &[FiscalYearRecord]) -> Vec<TrendFlag> {
    let mut flags = Vec::new();

    for pair in records.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        let pat_change = delta(curr.pat, prev.pat);
        let cash_change = delta(curr.cash, prev.cash);
        let ar_growth = growth(curr.ar, prev.ar);
        let rev_growth = growth(curr.revenue, prev.revenue);
        let margin_change = delta(margin(curr), margin(prev));

        if let (Some(pat), Some(cash)) = (pat_change, cash_change)
            && pat > 0.0
            && cash < 0.0
        {
            flags.push(TrendFlag {
                year: curr.year.clone(),
                category: TrendCategory::ProfitUpCashDown,
                name: "Profit ↑ Cash ↓".to_string(),
                detected: true,
                interpretation: "Earnings quality risk: tighten AR policy".to_string(),
            });
        }

        if let (Some(ar), Some(rev)) = (ar_growth, rev_growth)
            && ar > rev + 0.05
        {
            flags.push(TrendFlag {
                year: curr.year.clone(),
                category: TrendCategory::ReceivablesOutpacingRevenue,
                name: "AR Growing Faster".to_string(),
                detected: true,
                interpretation: "Collections lag: enforce AR aging thresholds".to_string(),
            });
        }

        if let (Some(rev), Some(margin)) = (rev_growth, margin_change)
            && rev > 0.15
            && margin <= 0.0
        {
            flags.push(TrendFlag {
                year: curr.year.clone(),
                category: TrendCategory::RevenueSpikeMarginsFlat,
                name: "Revenue Spike, Margins Flat".to_string(),
                detected: true,
                interpretation: "Potential discount-led growth: audit recognition".to_string(),
            });
        }
    }

    if flags.is_empty() {
        flags.push(TrendFlag {
            year: records.last().map(|r| r.year.clone()).unwrap_or_default(),
            category: TrendCategory::OverallHealth,
            name: "Overall Health".to_string(),
            detected: false,
            interpretation: "No major anomalies detected. Financial metrics appear healthy.".to_string(),
        });
    }

    flags
}

/// Classify every consecutive year pair of an ascending sequence.
#[must_use]
pub fn bridge_notes(records: &[FiscalYearRecord]) -> Vec<BridgeNote> {
    records
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            let d_revenue = delta(curr.revenue, prev.revenue);
            let d_pat = delta(curr.pat, prev.pat);
            let d_ocf = delta(curr.ocf, prev.ocf);
            let d_cash = delta(curr.cash, prev.cash);

            let note = if up(d_revenue) && up(d_pat) && down(d_ocf) {
                "Cash conversion leaking: investigate AR and WC"
            } else if up(d_revenue) && flat_or_down(d_pat) {
                "Profitability not keeping pace: margin compression"
            } else if up(d_pat) && down(d_cash) {
                "Liquidity stress: profits not translating to cash"
            } else {
                "Healthy bridge alignment"
            };

            BridgeNote {
                year: curr.year.clone(),
                note: note.to_string(),
            }
        })
        .collect()
}

fn delta(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

/// Fractional growth relative to a non-zero prior value.
fn growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) if p != 0.0 => Some((c - p) / p),
        _ => None,
    }
}

/// EBITDA margin as a fraction, when computable.
fn margin(record: &FiscalYearRecord) -> Option<f64> {
    match (record.ebitda, record.revenue) {
        (Some(e), Some(r)) if r != 0.0 => Some(e / r),
        _ => None,
    }
}

fn up(d: Option<f64>) -> bool {
    d.is_some_and(|v| v > 0.0)
}

fn down(d: Option<f64>) -> bool {
    d.is_some_and(|v| v < 0.0)
}

fn flat_or_down(d: Option<f64>) -> bool {
    d.is_some_and(|v| v <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(
        y: &str,
        revenue: f64,
        ebitda: f64,
        pat: f64,
        ocf: f64,
        ar: f64,
        cash: f64,
    ) -> FiscalYearRecord {
        FiscalYearRecord {
            year: y.to_string(),
            revenue: Some(revenue),
            ebitda: Some(ebitda),
            pat: Some(pat),
            ocf: Some(ocf),
            ar: Some(ar),
            cash: Some(cash),
            ..FiscalYearRecord::default()
        }
    }

    #[test]
    fn test_profit_up_cash_down() {
        let records = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1050.0, 210.0, 120.0, 160.0, 105.0, 250.0),
        ];
        let flags = evaluate(&records);
        assert!(
            flags
                .iter()
                .any(|f| f.category == TrendCategory::ProfitUpCashDown && f.detected)
        );
    }

    #[test]
    fn test_receivables_outpacing_revenue() {
        // AR +30%, revenue +10%: gap is 20pp, over the 5pp threshold.
        let records = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1100.0, 220.0, 110.0, 160.0, 130.0, 320.0),
        ];
        let flags = evaluate(&records);
        assert!(
            flags
                .iter()
                .any(|f| f.category == TrendCategory::ReceivablesOutpacingRevenue)
        );
    }

    #[test]
    fn test_revenue_spike_with_flat_margin() {
        // Revenue +20%, margin held at 20%: change is exactly zero.
        let records = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1200.0, 240.0, 120.0, 170.0, 110.0, 320.0),
        ];
        let flags = evaluate(&records);
        assert!(
            flags
                .iter()
                .any(|f| f.category == TrendCategory::RevenueSpikeMarginsFlat)
        );
    }

    #[test]
    fn test_quiet_sequence_yields_all_clear() {
        let records = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1050.0, 215.0, 108.0, 160.0, 103.0, 320.0),
        ];
        let flags = evaluate(&records);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].category, TrendCategory::OverallHealth);
        assert!(!flags[0].detected);
    }

    #[test]
    fn test_missing_figures_never_fire_rules() {
        let mut a = FiscalYearRecord::new("2023");
        a.pat = Some(100.0);
        let mut b = FiscalYearRecord::new("2024");
        b.pat = Some(120.0); // cash missing on both sides

        let flags = evaluate(&[a, b]);
        assert_eq!(flags[0].category, TrendCategory::OverallHealth);
    }

    #[test]
    fn test_bridge_note_classification() {
        // Revenue up, PAT up, OCF down: conversion leak.
        let leak = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1100.0, 220.0, 120.0, 140.0, 110.0, 320.0),
        ];
        assert_eq!(
            bridge_notes(&leak)[0].note,
            "Cash conversion leaking: investigate AR and WC"
        );

        // Revenue up, PAT down: margin compression.
        let compression = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1100.0, 200.0, 90.0, 160.0, 110.0, 320.0),
        ];
        assert_eq!(
            bridge_notes(&compression)[0].note,
            "Profitability not keeping pace: margin compression"
        );

        // PAT up with cash down, revenue flat: liquidity stress.
        let stress = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1000.0, 200.0, 120.0, 160.0, 100.0, 250.0),
        ];
        assert_eq!(
            bridge_notes(&stress)[0].note,
            "Liquidity stress: profits not translating to cash"
        );

        // Everything moving together: healthy.
        let healthy = vec![
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1100.0, 225.0, 115.0, 170.0, 105.0, 340.0),
        ];
        assert_eq!(bridge_notes(&healthy)[0].note, "Healthy bridge alignment");
    }

    #[test]
    fn test_one_note_per_year_pair() {
        let records = vec![
            year("2022", 900.0, 180.0, 90.0, 140.0, 95.0, 280.0),
            year("2023", 1000.0, 200.0, 100.0, 150.0, 100.0, 300.0),
            year("2024", 1100.0, 225.0, 115.0, 170.0, 105.0, 340.0),
        ];
        let notes = bridge_notes(&records);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].year, "2023");
        assert_eq!(notes[1].year, "2024");
    }
}
