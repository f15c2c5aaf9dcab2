//! Alpha Vantage API client implementation.

use crate::{
    Result,
    error::AvError,
    types::{AvBalanceReport, AvCashFlowReport, AvIncomeReport, AvOverview, AvStatementResponse},
};
use async_trait::async_trait;
use lustrum_core::{StatementBundle, StatementProvider};
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Base URL for the Alpha Vantage query API.
const AV_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage API client.
#[derive(Debug, Clone)]
pub struct AvClient {
    client: Client,
    api_key: String,
}

impl AvClient {
    /// Create a new Alpha Vantage client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the `ALPHAVANTAGE_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let api_key = env::var("ALPHAVANTAGE_API_KEY").map_err(|_| AvError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a query URL for a function/symbol pair.
    fn url(&self, function: &str, symbol: &str) -> String {
        format!(
            "{AV_BASE_URL}?function={function}&symbol={}&apikey={}",
            symbol.to_uppercase(),
            self.api_key
        )
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, function: &str, symbol: &str) -> Result<T> {
        let url = self.url(function, symbol);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AvError::Api(format!("HTTP {status}")));
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch one statement endpoint and unwrap its `annualReports` array.
    ///
    /// Alpha Vantage throttling notices arrive as well-formed responses
    /// without reports; they are logged and treated as absent data, the
    /// same as a symbol with no coverage.
    async fn annual_reports<T: serde::de::DeserializeOwned>(
        &self,
        function: &str,
        symbol: &str,
    ) -> Result<Vec<T>> {
        let resp: AvStatementResponse<T> = self.get(function, symbol).await?;
        if let Some(notice) = resp.notice() {
            warn!(symbol, function, notice, "Alpha Vantage notice");
        }
        Ok(resp.annual_reports)
    }

    /// Get annual income statement reports for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(&self, symbol: &str) -> Result<Vec<AvIncomeReport>> {
        self.annual_reports("INCOME_STATEMENT", symbol).await
    }

    /// Get annual balance sheet reports for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(&self, symbol: &str) -> Result<Vec<AvBalanceReport>> {
        self.annual_reports("BALANCE_SHEET", symbol).await
    }

    /// Get annual cash flow reports for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(&self, symbol: &str) -> Result<Vec<AvCashFlowReport>> {
        self.annual_reports("CASH_FLOW", symbol).await
    }

    /// Get the company overview for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn overview(&self, symbol: &str) -> Result<AvOverview> {
        self.get("OVERVIEW", symbol).await
    }
}

#[async_trait]
impl StatementProvider for AvClient {
    fn name(&self) -> &str {
        "Alpha Vantage"
    }

    async fn statements(&self, symbol: &str) -> lustrum_core::Result<StatementBundle> {
        let (income, balance, cash, overview) = tokio::join!(
            self.income_statement(symbol),
            self.balance_sheet(symbol),
            self.cash_flow(symbol),
            self.overview(symbol),
        );

        let income = income?;
        let balance = balance?;
        let cash = cash?;
        let company_name = match overview {
            Ok(o) => o.name,
            Err(e) => {
                warn!(symbol, error = %e, "Alpha Vantage overview fetch failed");
                None
            }
        };

        debug!(
            symbol,
            income = income.len(),
            balance = balance.len(),
            cash_flow = cash.len(),
            "fetched Alpha Vantage statements"
        );

        Ok(StatementBundle {
            symbol: symbol.to_uppercase(),
            company_name,
            income: income.into_iter().map(Into::into).collect(),
            balance: balance.into_iter().map(Into::into).collect(),
            cash_flow: cash.into_iter().map(Into::into).collect(),
        })
    }
}
