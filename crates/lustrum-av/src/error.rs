//! Error types for the Alpha Vantage adapter.

use thiserror::Error;

/// Errors that can occur when talking to the Alpha Vantage API.
#[derive(Debug, Error)]
pub enum AvError {
    /// Missing API key.
    #[error("ALPHAVANTAGE_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("Alpha Vantage API error: {0}")]
    Api(String),
}

impl From<AvError> for lustrum_core::LustrumError {
    fn from(err: AvError) -> Self {
        Self::Transport(err.to_string())
    }
}
