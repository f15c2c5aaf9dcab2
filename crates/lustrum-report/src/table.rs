//! Plain-text table rendering.
//!
//! Column order for the financials table is fixed and shared with the CSV
//! export. Missing values render as blank cells, never as zeros.

use crate::session::CompanySnapshot;
use lustrum_analysis::DerivedMetrics;
use lustrum_core::FiscalYearRecord;

/// Fixed financials column order, shared with the CSV export.
pub const FINANCIALS_COLUMNS: [&str; 14] = [
    "Year",
    "Revenue",
    "EBITDA",
    "PAT",
    "OCF",
    "FCF",
    "AR",
    "Cash",
    "Equity",
    "Debt",
    "InvestmentsAdvances",
    "DividendsPaid",
    "Inventory",
    "TradePayables",
];

/// Render the financials table for a reconciled sequence.
#[must_use]
pub fn financials_table(records: &[FiscalYearRecord]) -> String {
    let header: Vec<String> = FINANCIALS_COLUMNS.iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = records.iter().map(financials_row).collect();
    render(&header, &rows)
}

/// The financials row for one record, in [`FINANCIALS_COLUMNS`] order.
#[must_use]
pub fn financials_row(record: &FiscalYearRecord) -> Vec<String> {
    vec![
        record.year.clone(),
        amount(record.revenue),
        amount(record.ebitda),
        amount(record.pat),
        amount(record.ocf),
        amount(record.fcf),
        amount(record.ar),
        amount(record.cash),
        amount(record.equity),
        amount(record.debt),
        amount(record.investments_advances),
        amount(record.dividends_paid),
        amount(record.inventory),
        amount(record.payables),
    ]
}

/// Render the derived-metrics table.
#[must_use]
pub fn metrics_table(metrics: &[DerivedMetrics]) -> String {
    let header: Vec<String> = [
        "Year",
        "EBITDA Margin",
        "PAT Margin",
        "Cash Conversion",
        "DSO",
        "Equity Growth",
        "Cash/Equity",
        "Revenue YoY",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let rows: Vec<Vec<String>> = metrics
        .iter()
        .map(|m| {
            vec![
                m.year.clone(),
                pct(m.ebitda_margin_pct),
                pct(m.pat_margin_pct),
                times(m.cash_conversion_ratio),
                days(m.dso_days),
                pct(m.equity_growth_pct),
                times(m.cash_to_equity_ratio),
                pct(m.revenue_yoy_pct),
            ]
        })
        .collect();
    render(&header, &rows)
}

/// Render the threshold-flag table, one row per flag.
#[must_use]
pub fn threshold_table(flags_per_year: &[Vec<lustrum_analysis::ThresholdFlag>]) -> String {
    let header: Vec<String> = ["Year", "Flag", "Condition", "Interpretation"]
        .iter()
        .map(ToString::to_string)
        .collect();

    let rows: Vec<Vec<String>> = flags_per_year
        .iter()
        .flatten()
        .map(|f| {
            let label = match f.severity {
                lustrum_analysis::Severity::Neutral => "-".to_string(),
                s => format!("{s} flag"),
            };
            vec![
                f.year.clone(),
                label,
                f.condition.to_string(),
                f.interpretation.to_string(),
            ]
        })
        .collect();
    render(&header, &rows)
}

/// Render the trend-flag table.
#[must_use]
pub fn trend_table(flags: &[lustrum_analysis::TrendFlag]) -> String {
    let header: Vec<String> = ["Year", "Signal", "Interpretation"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let rows: Vec<Vec<String>> = flags
        .iter()
        .map(|f| {
            vec![
                f.year.clone(),
                f.name.to_string(),
                f.interpretation.to_string(),
            ]
        })
        .collect();
    render(&header, &rows)
}

/// Render the variance bridge notes.
#[must_use]
pub fn bridge_table(notes: &[lustrum_analysis::BridgeNote]) -> String {
    let header: Vec<String> = ["Year", "Bridge"].iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = notes
        .iter()
        .map(|n| vec![n.year.clone(), n.note.to_string()])
        .collect();
    render(&header, &rows)
}

/// Render every table of a snapshot, in display order, with headings.
#[must_use]
pub fn full_report(snapshot: &CompanySnapshot) -> String {
    let title = snapshot
        .company_name
        .as_deref()
        .map_or_else(|| snapshot.symbol.clone(), |name| {
            format!("{name} ({})", snapshot.symbol)
        });

    format!(
        "{title}\n\nFinancials\n{}\nDerived Metrics\n{}\nThreshold Flags\n{}\nTrend Signals\n{}\nVariance Bridge\n{}",
        financials_table(&snapshot.records),
        metrics_table(&snapshot.metrics),
        threshold_table(&snapshot.threshold_flags),
        trend_table(&snapshot.trend_flags),
        bridge_table(&snapshot.bridge_notes),
    )
}

/// Format a monetary amount with thousands separators; blank when missing.
fn amount(value: Option<f64>) -> String {
    let Some(v) = value else {
        return String::new();
    };
    if v.fract() == 0.0 && v.abs() < 1e15 {
        group_thousands(v as i64)
    } else {
        format!("{v:.2}")
    }
}

fn group_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i % 3) == lead % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn pct(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.1} %"))
}

fn times(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2} x"))
}

fn days(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.0} days"))
}

/// Pad columns to their widest cell and join rows with newlines.
fn render(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    render_row(&mut out, header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, row: &[String], widths: &[usize]) {
    for (i, cell) in row.iter().enumerate() {
        if i != 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        let pad = widths[i].saturating_sub(cell.chars().count());
        out.extend(std::iter::repeat_n(' ', pad));
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use lustrum_analysis::MetricsConfig;

    fn record(year: &str, revenue: Option<f64>) -> FiscalYearRecord {
        let mut r = FiscalYearRecord::new(year);
        r.revenue = revenue;
        r
    }

    #[test]
    fn test_financials_header_order() {
        let table = financials_table(&[record("2024", Some(1000.0))]);
        let header = table.lines().next().unwrap();
        assert!(header.starts_with("Year"));
        assert!(header.contains("InvestmentsAdvances"));
        assert!(header.trim_end().ends_with("TradePayables"));
    }

    #[test]
    fn test_missing_values_render_blank() {
        let table = financials_table(&[record("1999", None)]);
        let data_row = table.lines().nth(2).unwrap();
        assert!(data_row.starts_with("1999"));
        assert!(!data_row.contains('0'));
    }

    #[test]
    fn test_amount_grouping() {
        assert_eq!(amount(Some(391_035_000_000.0)), "391,035,000,000");
        assert_eq!(amount(Some(-1234.0)), "-1,234");
        assert_eq!(amount(Some(12.5)), "12.50");
        assert_eq!(amount(None), "");
    }

    #[test]
    fn test_metric_formats() {
        assert_eq!(pct(Some(12.34)), "12.3 %");
        assert_eq!(times(Some(0.851)), "0.85 x");
        assert_eq!(days(Some(95.4)), "95 days");
        assert_eq!(pct(None), "");
    }

    #[test]
    fn test_full_report_contains_all_sections() {
        let snapshot = CompanySnapshot::compute(
            "AAPL",
            Some("Apple Inc.".to_string()),
            vec![record("2023", Some(900.0)), record("2024", Some(1000.0))],
            &MetricsConfig::default(),
        );
        let report = full_report(&snapshot);
        assert!(report.starts_with("Apple Inc. (AAPL)"));
        assert!(report.contains("Financials"));
        assert!(report.contains("Derived Metrics"));
        assert!(report.contains("Threshold Flags"));
        assert!(report.contains("Trend Signals"));
        assert!(report.contains("Variance Bridge"));
    }
}
