//! Year-keyed reconciliation of statement reports.
//!
//! The three statement types are fetched independently and may cover
//! different fiscal years, so reports are merged by the 4-digit year
//! extracted from each period-end date rather than by array position.
//! Each statement pass fills only the fields it owns; a pass can never
//! blank a field populated by another statement type.

use lustrum_core::{
    FiscalYearRecord, LustrumError, RawValue, Result, StatementBundle, parse_numeric,
};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A reconciled sequence keeps at most the 5 most recent fiscal years.
const MAX_YEARS: usize = 5;

/// Merge a statement bundle into the canonical fiscal-year sequence.
///
/// Output is ascending by year, truncated to the [`MAX_YEARS`] most recent
/// distinct years.
///
/// # Errors
///
/// - [`LustrumError::NoData`] when all three statement arrays are empty.
/// - [`LustrumError::UnmappableData`] when reports existed but none carried
///   a parseable fiscal year.
pub fn reconcile(bundle: &StatementBundle) -> Result<Vec<FiscalYearRecord>> {
    if bundle.is_empty() {
        return Err(LustrumError::NoData(bundle.symbol.clone()));
    }

    let mut years: BTreeMap<String, FiscalYearRecord> = BTreeMap::new();

    merge_income(&mut years, bundle);
    merge_balance(&mut years, bundle);
    merge_cash_flow(&mut years, bundle);

    if years.is_empty() {
        return Err(LustrumError::UnmappableData(bundle.symbol.clone()));
    }

    // BTreeMap iteration is ascending; 4-digit year strings sort numerically.
    let mut records: Vec<FiscalYearRecord> = years.into_values().collect();
    if records.len() > MAX_YEARS {
        records.drain(..records.len() - MAX_YEARS);
    }
    Ok(records)
}

/// Extract the 4-digit fiscal year prefix from a period-end date string.
fn extract_year(period_end: &str) -> Option<&str> {
    let year = period_end.get(..4)?;
    year.bytes().all(|b| b.is_ascii_digit()).then_some(year)
}

/// Resolve the year key for a report within one statement pass.
///
/// Reports without a parseable year are dropped silently (absent data, not
/// an error). Duplicate years within one statement type keep the first
/// report seen: providers return newest-first, so the newest wins.
fn year_key<'a>(period_end: &'a str, seen: &mut HashSet<String>, statement: &str) -> Option<&'a str> {
    let Some(year) = extract_year(period_end) else {
        debug!(period_end, statement, "dropping report with unparseable year");
        return None;
    };
    if !seen.insert(year.to_string()) {
        debug!(year, statement, "dropping duplicate report for year");
        return None;
    }
    Some(year)
}

fn record<'a>(
    years: &'a mut BTreeMap<String, FiscalYearRecord>,
    year: &str,
) -> &'a mut FiscalYearRecord {
    years
        .entry(year.to_string())
        .or_insert_with(|| FiscalYearRecord::new(year))
}

fn merge_income(years: &mut BTreeMap<String, FiscalYearRecord>, bundle: &StatementBundle) {
    let mut seen = HashSet::new();
    for report in &bundle.income {
        let Some(year) = year_key(&report.period_end, &mut seen, "income") else {
            continue;
        };
        let rec = record(years, year);
        rec.revenue = parse_numeric(&report.total_revenue);
        rec.ebitda = derive_ebitda(
            &report.ebitda,
            &report.operating_income,
            &report.depreciation_and_amortization,
        );
        rec.pat = parse_numeric(&report.net_income);
    }
}

fn merge_balance(years: &mut BTreeMap<String, FiscalYearRecord>, bundle: &StatementBundle) {
    let mut seen = HashSet::new();
    for report in &bundle.balance {
        let Some(year) = year_key(&report.period_end, &mut seen, "balance") else {
            continue;
        };
        let rec = record(years, year);
        rec.equity = parse_numeric(&report.total_shareholder_equity);
        rec.debt = derive_debt(
            &report.short_term_debt,
            &report.long_term_debt,
            &report.total_liabilities,
        );
        rec.ar = parse_numeric(&report.receivables);
        rec.inventory = parse_numeric(&report.inventory);
        rec.cash = parse_numeric(&report.cash_and_equivalents);
        rec.investments_advances = sum_present(
            &report.short_term_investments,
            &report.long_term_investments,
        );
        rec.payables = parse_numeric(&report.accounts_payable);
    }
}

fn merge_cash_flow(years: &mut BTreeMap<String, FiscalYearRecord>, bundle: &StatementBundle) {
    let mut seen = HashSet::new();
    for report in &bundle.cash_flow {
        let Some(year) = year_key(&report.period_end, &mut seen, "cash_flow") else {
            continue;
        };
        let rec = record(years, year);
        rec.ocf = parse_numeric(&report.operating_cash_flow);
        // FCF is all-or-nothing: never partially computed.
        rec.fcf = match (rec.ocf, parse_numeric(&report.capital_expenditures)) {
            (Some(ocf), Some(capex)) => Some(ocf - capex),
            _ => None,
        };
        rec.dividends_paid = parse_numeric(&report.dividends_paid);
    }
}

/// EBITDA policy: provider-reported value when present; else operating
/// income plus D&A when both present; else operating income alone; else
/// missing.
fn derive_ebitda(reported: &RawValue, operating: &RawValue, dep_amort: &RawValue) -> Option<f64> {
    if let Some(ebitda) = parse_numeric(reported) {
        return Some(ebitda);
    }
    match (parse_numeric(operating), parse_numeric(dep_amort)) {
        (Some(op), Some(da)) => Some(op + da),
        (Some(op), None) => Some(op),
        _ => None,
    }
}

/// Debt policy: sum the short/long components that are present. Fall back
/// to total liabilities only when BOTH components are missing; an explicit
/// zero is a valid answer for a debt-free balance sheet.
fn derive_debt(short: &RawValue, long: &RawValue, liabilities: &RawValue) -> Option<f64> {
    sum_present(short, long).or_else(|| parse_numeric(liabilities))
}

/// Sum of whichever components are present; `None` when both are missing.
fn sum_present(a: &RawValue, b: &RawValue) -> Option<f64> {
    match (parse_numeric(a), parse_numeric(b)) {
        (None, None) => None,
        (x, y) => Some(x.unwrap_or(0.0) + y.unwrap_or(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lustrum_core::{BalanceReport, CashFlowReport, IncomeReport};

    fn num(v: f64) -> RawValue {
        RawValue::Number(v)
    }

    fn income(period_end: &str, revenue: f64) -> IncomeReport {
        IncomeReport {
            period_end: period_end.to_string(),
            total_revenue: num(revenue),
            ..IncomeReport::default()
        }
    }

    fn balance(period_end: &str, equity: f64) -> BalanceReport {
        BalanceReport {
            period_end: period_end.to_string(),
            total_shareholder_equity: num(equity),
            ..BalanceReport::default()
        }
    }

    fn bundle(
        income: Vec<IncomeReport>,
        balance: Vec<BalanceReport>,
        cash_flow: Vec<CashFlowReport>,
    ) -> StatementBundle {
        StatementBundle {
            symbol: "TEST".to_string(),
            company_name: None,
            income,
            balance,
            cash_flow,
        }
    }

    #[test]
    fn test_seven_years_truncate_to_five_most_recent_ascending() {
        let reports = (2018..=2024)
            .rev()
            .map(|y| income(&format!("{y}-12-31"), y as f64))
            .collect();
        let records = reconcile(&bundle(reports, vec![], vec![])).unwrap();
        assert_eq!(records.len(), 5);
        let years: Vec<&str> = records.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(years, vec!["2020", "2021", "2022", "2023", "2024"]);
    }

    #[test]
    fn test_offset_statement_coverage_merges_by_year() {
        // Income covers 2020..2024, balance covers 2019..2023.
        let income_reports = (2020..=2024)
            .rev()
            .map(|y| income(&format!("{y}-12-31"), 1000.0))
            .collect();
        let balance_reports = (2019..=2023)
            .rev()
            .map(|y| balance(&format!("{y}-12-31"), 500.0))
            .collect();
        let records = reconcile(&bundle(income_reports, balance_reports, vec![])).unwrap();

        // Union is 2019..2024 (6 years), truncated to 2020..2024.
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].year, "2020");
        assert_eq!(records[4].year, "2024");

        // 2024 has income fields but no balance fields.
        let last = &records[4];
        assert_eq!(last.revenue, Some(1000.0));
        assert_eq!(last.equity, None);
        assert_eq!(last.debt, None);

        // 2020 has both.
        let first = &records[0];
        assert_eq!(first.revenue, Some(1000.0));
        assert_eq!(first.equity, Some(500.0));
    }

    #[test]
    fn test_ebitda_derivation() {
        let mut report = IncomeReport {
            period_end: "2024-12-31".to_string(),
            operating_income: num(100.0),
            depreciation_and_amortization: num(20.0),
            ..IncomeReport::default()
        };
        let records = reconcile(&bundle(vec![report.clone()], vec![], vec![])).unwrap();
        assert_relative_eq!(records[0].ebitda.unwrap(), 120.0);

        report.depreciation_and_amortization = RawValue::Null;
        let records = reconcile(&bundle(vec![report.clone()], vec![], vec![])).unwrap();
        assert_relative_eq!(records[0].ebitda.unwrap(), 100.0);

        report.operating_income = RawValue::Null;
        let records = reconcile(&bundle(vec![report.clone()], vec![], vec![])).unwrap();
        assert_eq!(records[0].ebitda, None);

        // Provider-reported EBITDA takes precedence over derivation.
        report.ebitda = num(150.0);
        report.operating_income = num(100.0);
        report.depreciation_and_amortization = num(20.0);
        let records = reconcile(&bundle(vec![report], vec![], vec![])).unwrap();
        assert_relative_eq!(records[0].ebitda.unwrap(), 150.0);
    }

    #[test]
    fn test_debt_zero_components_do_not_trigger_liabilities_fallback() {
        let report = BalanceReport {
            period_end: "2024-12-31".to_string(),
            short_term_debt: num(0.0),
            long_term_debt: num(0.0),
            total_liabilities: num(5000.0),
            ..BalanceReport::default()
        };
        let records = reconcile(&bundle(vec![], vec![report], vec![])).unwrap();
        // Debt-free company stays at zero; liabilities are not substituted.
        assert_relative_eq!(records[0].debt.unwrap(), 0.0);
    }

    #[test]
    fn test_debt_falls_back_to_liabilities_only_when_both_components_missing() {
        let report = BalanceReport {
            period_end: "2024-12-31".to_string(),
            total_liabilities: num(5000.0),
            ..BalanceReport::default()
        };
        let records = reconcile(&bundle(vec![], vec![report], vec![])).unwrap();
        assert_relative_eq!(records[0].debt.unwrap(), 5000.0);

        let report = BalanceReport {
            period_end: "2024-12-31".to_string(),
            long_term_debt: num(300.0),
            total_liabilities: num(5000.0),
            ..BalanceReport::default()
        };
        let records = reconcile(&bundle(vec![], vec![report], vec![])).unwrap();
        assert_relative_eq!(records[0].debt.unwrap(), 300.0);
    }

    #[test]
    fn test_fcf_requires_both_inputs() {
        let complete = CashFlowReport {
            period_end: "2024-12-31".to_string(),
            operating_cash_flow: num(200.0),
            capital_expenditures: num(50.0),
            ..CashFlowReport::default()
        };
        let records = reconcile(&bundle(vec![], vec![], vec![complete])).unwrap();
        assert_relative_eq!(records[0].fcf.unwrap(), 150.0);

        let partial = CashFlowReport {
            period_end: "2023-12-31".to_string(),
            operating_cash_flow: num(200.0),
            ..CashFlowReport::default()
        };
        let records = reconcile(&bundle(vec![], vec![], vec![partial])).unwrap();
        assert_eq!(records[0].ocf, Some(200.0));
        assert_eq!(records[0].fcf, None);
    }

    #[test]
    fn test_all_empty_is_no_data() {
        let err = reconcile(&bundle(vec![], vec![], vec![])).unwrap_err();
        assert!(matches!(err, LustrumError::NoData(_)));
    }

    #[test]
    fn test_all_unparseable_years_is_unmappable() {
        let reports = vec![income("bogus", 1.0), income("20", 2.0), income("", 3.0)];
        let err = reconcile(&bundle(reports, vec![], vec![])).unwrap_err();
        assert!(matches!(err, LustrumError::UnmappableData(_)));
    }

    #[test]
    fn test_unparseable_years_dropped_silently_among_valid_ones() {
        let reports = vec![income("2024-12-31", 10.0), income("n/a", 99.0)];
        let records = reconcile(&bundle(reports, vec![], vec![])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, "2024");
    }

    #[test]
    fn test_duplicate_year_first_report_wins() {
        // Newest-first arrays: the first 2024 report is the newest filing.
        let reports = vec![income("2024-12-31", 111.0), income("2024-06-30", 222.0)];
        let records = reconcile(&bundle(reports, vec![], vec![])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, Some(111.0));
    }

    #[test]
    fn test_missing_source_values_stay_missing() {
        let report = IncomeReport {
            period_end: "2024-12-31".to_string(),
            total_revenue: RawValue::Text("N/A".to_string()),
            ..IncomeReport::default()
        };
        let records = reconcile(&bundle(vec![report], vec![], vec![])).unwrap();
        assert_eq!(records[0].revenue, None);
    }
}
