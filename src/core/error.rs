//! Failure taxonomy for rate lookups and amount parsing.

use std::error::Error as _;
use thiserror::Error;

/// Every way a single rate lookup can fail. Each one is terminal for the
/// current request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("API key is missing")]
    Configuration,

    #[error("Rate limit exceeded! Too many API requests.")]
    RateLimit,

    #[error("API request failed with HTTP status {status}")]
    ApiRequest { status: u16 },

    #[error("API Error: {0}")]
    Api(String),

    #[error("Invalid currency code: {0}")]
    UnknownCurrency(String),

    #[error("Network error: Unable to reach the API ({0}). Check your internet connection.")]
    Network(String),

    #[error("Request timed out. The API server is taking too long to respond.")]
    Timeout,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl RateError {
    /// Rate limiting is expected under load and is reported as a warning;
    /// everything else is an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, RateError::RateLimit)
    }

    /// Masks every occurrence of `secret` in the error's detail text.
    pub fn redact(self, secret: &str) -> Self {
        let mask = |detail: String| {
            if secret.is_empty() {
                detail
            } else {
                detail.replace(secret, "***")
            }
        };
        match self {
            RateError::Network(detail) => RateError::Network(mask(detail)),
            RateError::Unexpected(detail) => RateError::Unexpected(mask(detail)),
            other => other,
        }
    }
}

/// Renders a transport error with its causes. The request URL carries the API
/// key, so it is stripped first.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RateError::Timeout
        } else if err.is_connect() {
            RateError::Network(describe(err))
        } else {
            RateError::Unexpected(describe(err))
        }
    }
}

impl From<serde_json::Error> for RateError {
    fn from(err: serde_json::Error) -> Self {
        RateError::Unexpected(format!("Failed to parse JSON response: {err}"))
    }
}

/// Amount text that is not a finite, non-negative number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid amount: {input:?}")]
pub struct InvalidAmount {
    pub input: String,
}
