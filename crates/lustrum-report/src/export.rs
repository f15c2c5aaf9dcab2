//! CSV and JSON export.
//!
//! CSV carries the reconciled financials in the fixed column order shared
//! with the text table; missing values become empty cells. JSON carries
//! the whole snapshot, derived data included.

use crate::session::CompanySnapshot;
use crate::table::FINANCIALS_COLUMNS;
use lustrum_core::FiscalYearRecord;
use std::io;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values of the financials table.
    #[default]
    Csv,

    /// Compact JSON of the full snapshot.
    Json,

    /// Pretty-printed JSON of the full snapshot.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Write the financials of a reconciled sequence as CSV.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_csv<W: io::Write>(records: &[FiscalYearRecord], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(FINANCIALS_COLUMNS)?;
    for record in records {
        wtr.write_record(csv_row(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a snapshot as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn write_json<W: io::Write>(
    snapshot: &CompanySnapshot,
    writer: W,
    pretty: bool,
) -> Result<(), ExportError> {
    if pretty {
        serde_json::to_writer_pretty(writer, snapshot)?;
    } else {
        serde_json::to_writer(writer, snapshot)?;
    }
    Ok(())
}

/// Export a snapshot to a string in the given format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_to_string(
    snapshot: &CompanySnapshot,
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&snapshot.records, &mut buf)?;
            // csv output of valid UTF-8 records stays valid UTF-8
            Ok(String::from_utf8(buf).map_err(|e| io::Error::other(e.to_string()))?)
        }
        ExportFormat::Json => Ok(serde_json::to_string(snapshot)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

fn csv_row(record: &FiscalYearRecord) -> Vec<String> {
    let cell = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
    vec![
        record.year.clone(),
        cell(record.revenue),
        cell(record.ebitda),
        cell(record.pat),
        cell(record.ocf),
        cell(record.fcf),
        cell(record.ar),
        cell(record.cash),
        cell(record.equity),
        cell(record.debt),
        cell(record.investments_advances),
        cell(record.dividends_paid),
        cell(record.inventory),
        cell(record.payables),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lustrum_analysis::MetricsConfig;

    fn snapshot() -> CompanySnapshot {
        let mut a = FiscalYearRecord::new("2023");
        a.revenue = Some(900.0);
        a.ebitda = Some(180.0);
        let mut b = FiscalYearRecord::new("2024");
        b.revenue = Some(1000.0);
        // ebitda deliberately missing for 2024
        CompanySnapshot::compute("AAPL", None, vec![a, b], &MetricsConfig::default())
    }

    #[test]
    fn test_csv_header_order_is_fixed() {
        let csv = export_to_string(&snapshot(), ExportFormat::Csv).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Year,Revenue,EBITDA,PAT,OCF,FCF,AR,Cash,Equity,Debt,\
             InvestmentsAdvances,DividendsPaid,Inventory,TradePayables"
        );
    }

    #[test]
    fn test_csv_missing_values_are_empty_cells() {
        let csv = export_to_string(&snapshot(), ExportFormat::Csv).unwrap();
        let row_2024 = csv.lines().nth(2).unwrap();
        // Year, revenue present, then empty EBITDA cell.
        assert!(row_2024.starts_with("2024,1000,,"));
    }

    #[test]
    fn test_json_round_trips_the_snapshot() {
        let snap = snapshot();
        let json = export_to_string(&snap, ExportFormat::Json).unwrap();
        let back: CompanySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_pretty_json_is_indented() {
        let json = export_to_string(&snapshot(), ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("  \"symbol\""));
    }

    #[test]
    fn test_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
