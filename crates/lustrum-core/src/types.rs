//! Canonical data model for the Lustrum pipeline.
//!
//! Provider adapters normalize their native payloads into the statement
//! report types here; the reconciler merges those into the year-keyed
//! [`FiscalYearRecord`] sequence that everything downstream consumes.

use crate::numeric::RawValue;
use serde::{Deserialize, Serialize};

/// One annual income statement report in normalized field names.
///
/// `ebitda` is carried when the provider reports it directly (FMP does);
/// otherwise the reconciler derives it from operating income and D&A.
#[derive(Debug, Clone, Default)]
pub struct IncomeReport {
    /// Reporting-period end date string, e.g. `"2024-09-28"`.
    pub period_end: String,
    /// Total revenue.
    pub total_revenue: RawValue,
    /// Operating income.
    pub operating_income: RawValue,
    /// Depreciation and amortization.
    pub depreciation_and_amortization: RawValue,
    /// Provider-reported EBITDA, when available.
    pub ebitda: RawValue,
    /// Net income (profit after tax).
    pub net_income: RawValue,
}

/// One annual balance sheet report in normalized field names.
#[derive(Debug, Clone, Default)]
pub struct BalanceReport {
    /// Reporting-period end date string.
    pub period_end: String,
    /// Total shareholder equity.
    pub total_shareholder_equity: RawValue,
    /// Short-term debt.
    pub short_term_debt: RawValue,
    /// Long-term debt.
    pub long_term_debt: RawValue,
    /// Total liabilities (debt fallback when both debt components are absent).
    pub total_liabilities: RawValue,
    /// Accounts receivable.
    pub receivables: RawValue,
    /// Inventory.
    pub inventory: RawValue,
    /// Cash and cash equivalents.
    pub cash_and_equivalents: RawValue,
    /// Short-term investments.
    pub short_term_investments: RawValue,
    /// Long-term investments.
    pub long_term_investments: RawValue,
    /// Accounts payable.
    pub accounts_payable: RawValue,
}

/// One annual cash flow report in normalized field names.
#[derive(Debug, Clone, Default)]
pub struct CashFlowReport {
    /// Reporting-period end date string.
    pub period_end: String,
    /// Operating cash flow.
    pub operating_cash_flow: RawValue,
    /// Capital expenditures.
    pub capital_expenditures: RawValue,
    /// Dividends paid.
    pub dividends_paid: RawValue,
}

/// Everything one provider returned for one fetch cycle.
///
/// Report vectors are newest-first, as providers return them. The bundle
/// is ephemeral: it is consumed by reconciliation and never stored.
#[derive(Debug, Clone)]
pub struct StatementBundle {
    /// Ticker symbol the bundle was fetched for.
    pub symbol: String,
    /// Company display name from the provider profile, when available.
    pub company_name: Option<String>,
    /// Annual income statement reports.
    pub income: Vec<IncomeReport>,
    /// Annual balance sheet reports.
    pub balance: Vec<BalanceReport>,
    /// Annual cash flow reports.
    pub cash_flow: Vec<CashFlowReport>,
}

impl StatementBundle {
    /// Whether all three statement arrays are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.balance.is_empty() && self.cash_flow.is_empty()
    }
}

/// The canonical per-year financial snapshot.
///
/// Every value field is `Option<f64>`: `None` means the source never
/// provided the figure, and is distinguishable from an explicit `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FiscalYearRecord {
    /// Four-digit fiscal year, the unique merge key.
    pub year: String,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// EBITDA (provider-reported or derived, see reconciler policy).
    pub ebitda: Option<f64>,
    /// Profit after tax (net income).
    pub pat: Option<f64>,
    /// Operating cash flow.
    pub ocf: Option<f64>,
    /// Free cash flow (`ocf - capex`, only when both were present).
    pub fcf: Option<f64>,
    /// Accounts receivable.
    pub ar: Option<f64>,
    /// Cash and equivalents.
    pub cash: Option<f64>,
    /// Shareholder equity.
    pub equity: Option<f64>,
    /// Total debt (short + long, falling back to total liabilities).
    pub debt: Option<f64>,
    /// Short- plus long-term investments.
    pub investments_advances: Option<f64>,
    /// Dividends paid.
    pub dividends_paid: Option<f64>,
    /// Inventory.
    pub inventory: Option<f64>,
    /// Trade payables.
    pub payables: Option<f64>,
}

impl FiscalYearRecord {
    /// Create an empty record for a fiscal year.
    #[must_use]
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            ..Self::default()
        }
    }
}
