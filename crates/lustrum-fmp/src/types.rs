//! Data types for FMP API responses.
//!
//! Value fields are `Option<f64>` rather than defaulted numbers: a field
//! FMP omits or nulls must stay missing, never silently become zero.

use chrono::NaiveDate;
use lustrum_core::{BalanceReport, CashFlowReport, IncomeReport, RawValue};
use serde::{Deserialize, Serialize};

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Reporting-period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<f64>,
    /// Depreciation and amortization.
    #[serde(default)]
    pub depreciation_and_amortization: Option<f64>,
    /// EBITDA as reported by FMP.
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl From<IncomeStatement> for IncomeReport {
    fn from(r: IncomeStatement) -> Self {
        Self {
            period_end: r.date,
            total_revenue: RawValue::from(r.revenue),
            operating_income: RawValue::from(r.operating_income),
            depreciation_and_amortization: RawValue::from(r.depreciation_and_amortization),
            ebitda: RawValue::from(r.ebitda),
            net_income: RawValue::from(r.net_income),
        }
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Reporting-period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
    /// Short-term debt.
    #[serde(default)]
    pub short_term_debt: Option<f64>,
    /// Long-term debt.
    #[serde(default)]
    pub long_term_debt: Option<f64>,
    /// Total liabilities.
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    /// Net receivables.
    #[serde(default)]
    pub net_receivables: Option<f64>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Option<f64>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
    /// Short-term investments.
    #[serde(default)]
    pub short_term_investments: Option<f64>,
    /// Long-term investments.
    #[serde(default)]
    pub long_term_investments: Option<f64>,
    /// Accounts payable.
    #[serde(default)]
    pub account_payables: Option<f64>,
}

impl BalanceSheet {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl From<BalanceSheet> for BalanceReport {
    fn from(r: BalanceSheet) -> Self {
        Self {
            period_end: r.date,
            total_shareholder_equity: RawValue::from(r.total_stockholders_equity),
            short_term_debt: RawValue::from(r.short_term_debt),
            long_term_debt: RawValue::from(r.long_term_debt),
            total_liabilities: RawValue::from(r.total_liabilities),
            receivables: RawValue::from(r.net_receivables),
            inventory: RawValue::from(r.inventory),
            cash_and_equivalents: RawValue::from(r.cash_and_cash_equivalents),
            short_term_investments: RawValue::from(r.short_term_investments),
            long_term_investments: RawValue::from(r.long_term_investments),
            accounts_payable: RawValue::from(r.account_payables),
        }
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Reporting-period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Dividends paid.
    #[serde(default)]
    pub dividends_paid: Option<f64>,
}

impl CashFlowStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl From<CashFlowStatement> for CashFlowReport {
    fn from(r: CashFlowStatement) -> Self {
        Self {
            period_end: r.date,
            operating_cash_flow: RawValue::from(r.operating_cash_flow),
            capital_expenditures: RawValue::from(r.capital_expenditure),
            dividends_paid: RawValue::from(r.dividends_paid),
        }
    }
}

/// Company profile data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company display name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Listing exchange.
    #[serde(default)]
    pub exchange: Option<String>,
    /// Reporting currency.
    #[serde(default)]
    pub currency: Option<String>,
}
