//! Data types for Alpha Vantage API responses.
//!
//! Alpha Vantage encodes every numeric field as a string, using `"None"`
//! for absent figures. The fields stay as optional strings here and are
//! resolved by the numeric gate during reconciliation.

use chrono::NaiveDate;
use lustrum_core::{BalanceReport, CashFlowReport, IncomeReport, RawValue};
use serde::{Deserialize, Serialize};

/// Envelope shared by the three statement endpoints.
///
/// Alpha Vantage signals throttling and usage errors inside an otherwise
/// well-formed 200 response, via `Note` / `Information` / `Error Message`
/// keys, with the report array absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AvStatementResponse<T> {
    /// Ticker symbol the response is for.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Annual reports, newest-first. Absent on notice responses.
    #[serde(rename = "annualReports", default = "Vec::new")]
    pub annual_reports: Vec<T>,
    /// Throttling notice.
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    /// Usage/plan notice.
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
    /// Error message.
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
}

impl<T> AvStatementResponse<T> {
    /// The notice text carried by this response, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

/// One annual income statement report from Alpha Vantage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvIncomeReport {
    /// Fiscal period end date, e.g. `"2024-09-30"`.
    pub fiscal_date_ending: String,
    /// Total revenue.
    #[serde(default)]
    pub total_revenue: Option<String>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<String>,
    /// Depreciation and amortization.
    #[serde(default)]
    pub depreciation_and_amortization: Option<String>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<String>,
}

impl AvIncomeReport {
    /// Parse the fiscal period end date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.fiscal_date_ending, "%Y-%m-%d").ok()
    }
}

impl From<AvIncomeReport> for IncomeReport {
    fn from(r: AvIncomeReport) -> Self {
        Self {
            period_end: r.fiscal_date_ending,
            total_revenue: RawValue::from(r.total_revenue),
            operating_income: RawValue::from(r.operating_income),
            depreciation_and_amortization: RawValue::from(r.depreciation_and_amortization),
            // AV does not report EBITDA on the income statement; the
            // reconciler derives it from operating income and D&A.
            ebitda: RawValue::Null,
            net_income: RawValue::from(r.net_income),
        }
    }
}

/// One annual balance sheet report from Alpha Vantage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvBalanceReport {
    /// Fiscal period end date.
    pub fiscal_date_ending: String,
    /// Total shareholder equity.
    #[serde(default)]
    pub total_shareholder_equity: Option<String>,
    /// Short-term debt.
    #[serde(default)]
    pub short_term_debt: Option<String>,
    /// Non-current long-term debt.
    #[serde(default)]
    pub long_term_debt_noncurrent: Option<String>,
    /// Total liabilities.
    #[serde(default)]
    pub total_liabilities: Option<String>,
    /// Current net receivables.
    #[serde(default)]
    pub current_net_receivables: Option<String>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Option<String>,
    /// Cash and cash equivalents at carrying value.
    #[serde(default)]
    pub cash_and_cash_equivalents_at_carrying_value: Option<String>,
    /// Short-term investments.
    #[serde(default)]
    pub short_term_investments: Option<String>,
    /// Long-term investments.
    #[serde(default)]
    pub long_term_investments: Option<String>,
    /// Current accounts payable.
    #[serde(default)]
    pub current_accounts_payable: Option<String>,
}

impl AvBalanceReport {
    /// Parse the fiscal period end date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.fiscal_date_ending, "%Y-%m-%d").ok()
    }
}

impl From<AvBalanceReport> for BalanceReport {
    fn from(r: AvBalanceReport) -> Self {
        Self {
            period_end: r.fiscal_date_ending,
            total_shareholder_equity: RawValue::from(r.total_shareholder_equity),
            short_term_debt: RawValue::from(r.short_term_debt),
            long_term_debt: RawValue::from(r.long_term_debt_noncurrent),
            total_liabilities: RawValue::from(r.total_liabilities),
            receivables: RawValue::from(r.current_net_receivables),
            inventory: RawValue::from(r.inventory),
            cash_and_equivalents: RawValue::from(r.cash_and_cash_equivalents_at_carrying_value),
            short_term_investments: RawValue::from(r.short_term_investments),
            long_term_investments: RawValue::from(r.long_term_investments),
            accounts_payable: RawValue::from(r.current_accounts_payable),
        }
    }
}

/// One annual cash flow report from Alpha Vantage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvCashFlowReport {
    /// Fiscal period end date.
    pub fiscal_date_ending: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cashflow: Option<String>,
    /// Capital expenditures.
    #[serde(default)]
    pub capital_expenditures: Option<String>,
    /// Dividend payout.
    #[serde(default)]
    pub dividend_payout: Option<String>,
}

impl AvCashFlowReport {
    /// Parse the fiscal period end date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.fiscal_date_ending, "%Y-%m-%d").ok()
    }
}

impl From<AvCashFlowReport> for CashFlowReport {
    fn from(r: AvCashFlowReport) -> Self {
        Self {
            period_end: r.fiscal_date_ending,
            operating_cash_flow: RawValue::from(r.operating_cashflow),
            capital_expenditures: RawValue::from(r.capital_expenditures),
            dividends_paid: RawValue::from(r.dividend_payout),
        }
    }
}

/// Company overview from Alpha Vantage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvOverview {
    /// Ticker symbol.
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
    /// Company display name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Listing exchange.
    #[serde(rename = "Exchange", default)]
    pub exchange: Option<String>,
    /// Reporting currency.
    #[serde(rename = "Currency", default)]
    pub currency: Option<String>,
}
