//! Derived financial ratios.
//!
//! Every metric is computed only when all of its inputs are present and any
//! divisor is non-zero; otherwise it is `None` and renders as blank, never
//! as zero or NaN. Derivation is a pure function of a record and its
//! chronological predecessor, so recomputation is always safe.

use lustrum_core::FiscalYearRecord;
use serde::{Deserialize, Serialize};

/// Divisor basis for the cash conversion ratio.
///
/// OCF over EBITDA is the canonical definition; OCF over PAT is the
/// documented alternative for callers that prefer a bottom-line basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashConversionBasis {
    /// Operating cash flow relative to EBITDA.
    #[default]
    Ebitda,
    /// Operating cash flow relative to profit after tax.
    Pat,
}

/// Configuration for metric derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Divisor used by [`DerivedMetrics::cash_conversion_ratio`].
    pub cash_conversion_basis: CashConversionBasis,
}

/// Derived ratios for one fiscal year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Fiscal year the metrics belong to.
    pub year: String,
    /// EBITDA as a percentage of revenue.
    pub ebitda_margin_pct: Option<f64>,
    /// PAT as a percentage of revenue.
    pub pat_margin_pct: Option<f64>,
    /// OCF over the configured basis (EBITDA or PAT).
    pub cash_conversion_ratio: Option<f64>,
    /// Days sales outstanding, `ar / revenue * 365`.
    pub dso_days: Option<f64>,
    /// Year-over-year equity growth percentage. Undefined for the first year.
    pub equity_growth_pct: Option<f64>,
    /// Cash over equity.
    pub cash_to_equity_ratio: Option<f64>,
    /// Year-over-year revenue growth percentage. Undefined for the first year.
    pub revenue_yoy_pct: Option<f64>,
}

/// Derive the metrics for one record given its chronological predecessor.
#[must_use]
pub fn derive(
    record: &FiscalYearRecord,
    prev: Option<&FiscalYearRecord>,
    config: &MetricsConfig,
) -> DerivedMetrics {
    let cash_conversion_divisor = match config.cash_conversion_basis {
        CashConversionBasis::Ebitda => record.ebitda,
        CashConversionBasis::Pat => record.pat,
    };

    DerivedMetrics {
        year: record.year.clone(),
        ebitda_margin_pct: ratio(record.ebitda, record.revenue).map(|r| r * 100.0),
        pat_margin_pct: ratio(record.pat, record.revenue).map(|r| r * 100.0),
        cash_conversion_ratio: ratio(record.ocf, cash_conversion_divisor),
        dso_days: ratio(record.ar, record.revenue).map(|r| r * 365.0),
        equity_growth_pct: growth_pct(record.equity, prev.and_then(|p| p.equity)),
        cash_to_equity_ratio: ratio(record.cash, record.equity),
        revenue_yoy_pct: growth_pct(record.revenue, prev.and_then(|p| p.revenue)),
    }
}

/// Derive metrics for an ascending reconciled sequence.
#[must_use]
pub fn derive_all(records: &[FiscalYearRecord], config: &MetricsConfig) -> Vec<DerivedMetrics> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let prev = i.checked_sub(1).map(|j| &records[j]);
            derive(record, prev, config)
        })
        .collect()
}

/// `numerator / divisor`, defined only when both are present and the divisor
/// is non-zero.
fn ratio(numerator: Option<f64>, divisor: Option<f64>) -> Option<f64> {
    match (numerator, divisor) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Year-over-year growth percentage relative to a non-zero prior value.
fn growth_pct(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) if p != 0.0 => Some((c - p) / p * 100.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(year: &str) -> FiscalYearRecord {
        FiscalYearRecord::new(year)
    }

    #[test]
    fn test_margins_and_dso() {
        let mut rec = record("2024");
        rec.revenue = Some(1000.0);
        rec.ebitda = Some(180.0);
        rec.pat = Some(90.0);
        rec.ar = Some(200.0);

        let m = derive(&rec, None, &MetricsConfig::default());
        assert_relative_eq!(m.ebitda_margin_pct.unwrap(), 18.0);
        assert_relative_eq!(m.pat_margin_pct.unwrap(), 9.0);
        assert_relative_eq!(m.dso_days.unwrap(), 73.0);
    }

    #[test]
    fn test_zero_revenue_leaves_margins_undefined() {
        let mut rec = record("2024");
        rec.revenue = Some(0.0);
        rec.ebitda = Some(50.0);
        rec.pat = Some(20.0);
        rec.ar = Some(10.0);

        let m = derive(&rec, None, &MetricsConfig::default());
        assert_eq!(m.ebitda_margin_pct, None);
        assert_eq!(m.pat_margin_pct, None);
        assert_eq!(m.dso_days, None);
    }

    #[test]
    fn test_cash_conversion_basis() {
        let mut rec = record("2024");
        rec.ocf = Some(85.0);
        rec.ebitda = Some(100.0);
        rec.pat = Some(50.0);

        let ebitda_basis = derive(&rec, None, &MetricsConfig::default());
        assert_relative_eq!(ebitda_basis.cash_conversion_ratio.unwrap(), 0.85);

        let pat_basis = derive(
            &rec,
            None,
            &MetricsConfig {
                cash_conversion_basis: CashConversionBasis::Pat,
            },
        );
        assert_relative_eq!(pat_basis.cash_conversion_ratio.unwrap(), 1.7);
    }

    #[test]
    fn test_growth_metrics_need_a_predecessor() {
        let mut a = record("2023");
        a.revenue = Some(800.0);
        a.equity = Some(400.0);
        let mut b = record("2024");
        b.revenue = Some(1000.0);
        b.equity = Some(500.0);
        b.cash = Some(100.0);

        let all = derive_all(&[a, b], &MetricsConfig::default());
        assert_eq!(all[0].revenue_yoy_pct, None);
        assert_eq!(all[0].equity_growth_pct, None);
        assert_relative_eq!(all[1].revenue_yoy_pct.unwrap(), 25.0);
        assert_relative_eq!(all[1].equity_growth_pct.unwrap(), 25.0);
        assert_relative_eq!(all[1].cash_to_equity_ratio.unwrap(), 0.2);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut a = record("2023");
        a.revenue = Some(800.0);
        a.ebitda = Some(120.0);
        let mut b = record("2024");
        b.revenue = Some(1000.0);
        b.ebitda = Some(150.0);
        b.ocf = Some(110.0);

        let records = vec![a, b];
        let config = MetricsConfig::default();
        let first = derive_all(&records, &config);
        let second = derive_all(&records, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_inputs_leave_metrics_undefined() {
        let m = derive(&record("2024"), None, &MetricsConfig::default());
        assert_eq!(m.ebitda_margin_pct, None);
        assert_eq!(m.cash_conversion_ratio, None);
        assert_eq!(m.cash_to_equity_ratio, None);
    }
}
