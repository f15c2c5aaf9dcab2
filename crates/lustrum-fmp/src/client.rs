//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{BalanceSheet, CashFlowStatement, CompanyProfile, IncomeStatement},
};
use async_trait::async_trait;
use lustrum_core::{StatementBundle, StatementProvider};
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Base URL for the FMP API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Number of annual periods requested per statement.
const ANNUAL_PERIODS: u32 = 5;

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // FMP reports errors in the body with a 200 status
        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        serde_json::from_str(&text).map_err(|e| {
            FmpError::Json(serde_json::Error::io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to parse: {e}. Response: {text}"),
            )))
        })
    }

    /// Get annual income statements for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(&self, symbol: &str) -> Result<Vec<IncomeStatement>> {
        let endpoint = format!(
            "income-statement/{}?period=annual&limit={ANNUAL_PERIODS}",
            symbol.to_uppercase()
        );
        self.get(&endpoint).await
    }

    /// Get annual balance sheets for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(&self, symbol: &str) -> Result<Vec<BalanceSheet>> {
        let endpoint = format!(
            "balance-sheet-statement/{}?period=annual&limit={ANNUAL_PERIODS}",
            symbol.to_uppercase()
        );
        self.get(&endpoint).await
    }

    /// Get annual cash flow statements for a symbol, newest-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(&self, symbol: &str) -> Result<Vec<CashFlowStatement>> {
        let endpoint = format!(
            "cash-flow-statement/{}?period=annual&limit={ANNUAL_PERIODS}",
            symbol.to_uppercase()
        );
        self.get(&endpoint).await
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile/{}", symbol.to_uppercase());
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl StatementProvider for FmpClient {
    fn name(&self) -> &str {
        "Financial Modeling Prep"
    }

    async fn statements(&self, symbol: &str) -> lustrum_core::Result<StatementBundle> {
        // All four fetches run concurrently and are awaited jointly.
        let (income, balance, cash, profile) = tokio::join!(
            self.income_statement(symbol),
            self.balance_sheet(symbol),
            self.cash_flow(symbol),
            self.profile(symbol),
        );

        // Statement failures abort the cycle; a missing profile only costs
        // the display name.
        let income = income?;
        let balance = balance?;
        let cash = cash?;
        let company_name = match profile {
            Ok(p) => p.company_name,
            Err(e) => {
                warn!(symbol, error = %e, "FMP profile fetch failed");
                None
            }
        };

        debug!(
            symbol,
            income = income.len(),
            balance = balance.len(),
            cash_flow = cash.len(),
            "fetched FMP statements"
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
