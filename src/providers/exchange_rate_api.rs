use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::core::config::{DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::core::currency::CurrencyRateProvider;
use crate::core::error::RateError;

/// The provider's payload, one variant per outcome. A body that fits neither
/// shape fails deserialization and is reported as unexpected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExchangeRateResponse {
    Failure {
        #[allow(dead_code)]
        result: ErrorMarker,
        #[serde(rename = "error-type")]
        error_type: String,
    },
    Rates {
        conversion_rates: HashMap<String, f64>,
        time_last_update_unix: Option<i64>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ErrorMarker {
    Error,
}

impl ExchangeRateResponse {
    fn rate_for(self, to: &str) -> Result<f64, RateError> {
        match self {
            ExchangeRateResponse::Failure { error_type, .. } => Err(RateError::Api(error_type)),
            ExchangeRateResponse::Rates {
                conversion_rates,
                time_last_update_unix,
            } => {
                debug!(?time_last_update_unix, "Rates last updated");
                let rate = *conversion_rates
                    .get(to)
                    .ok_or_else(|| RateError::UnknownCurrency(to.to_string()))?;
                if !rate.is_finite() || rate <= 0.0 {
                    return Err(RateError::Unexpected(format!(
                        "Invalid rate {rate} for currency: {to}"
                    )));
                }
                Ok(rate)
            }
        }
    }
}

/// Rate source backed by ExchangeRate-API's `/v6/{key}/latest/{base}` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Bounds connecting and each read by `timeout`, and the whole request by
    /// twice that. Values above `MAX_TIMEOUT_SECS` are capped.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.min(Duration::from_secs(MAX_TIMEOUT_SECS));
        self
    }

    fn client(&self) -> Result<reqwest::Client, RateError> {
        reqwest::Client::builder()
            .user_agent("fxconv/1.0")
            .connect_timeout(self.timeout)
            .read_timeout(self.timeout)
            .timeout(self.timeout.saturating_mul(2))
            .build()
            .map_err(|e| RateError::Unexpected(format!("Failed to build HTTP client: {e}")))
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RateError::Configuration)?;

        self.request_rate(api_key, from, to)
            .await
            .map_err(|e| e.redact(api_key))
    }

    async fn request_rate(&self, api_key: &str, from: &str, to: &str) -> Result<f64, RateError> {
        let url = format!("{}/v6/{api_key}/latest/{from}", self.base_url);
        debug!("Requesting exchange rates for {from}");

        let response = self.client()?.get(&url).send().await?;
        debug!(status = %response.status(), "Received exchange rate response");

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RateError::RateLimit);
        }
        if !status.is_success() {
            return Err(RateError::ApiRequest {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let data: ExchangeRateResponse = serde_json::from_str(&text)?;
        data.rate_for(to)
    }
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(from = %from, to = %to))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        match self.fetch_rate(from, to).await {
            Ok(rate) => {
                info!("Successfully fetched exchange rate: {from} to {to} = {rate}");
                Ok(rate)
            }
            Err(e) if e.is_warning() => {
                warn!("{e}");
                Err(e)
            }
            Err(e) => {
                error!("{e}");
                Err(e)
            }
        }
    }
}
