//! Converting an amount using a live rate.

use crate::core::currency::CurrencyRateProvider;
use crate::core::error::InvalidAmount;
use thiserror::Error;
use tracing::{error, info, instrument};

/// A completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub converted: f64,
}

/// The conversion could not be performed. The cause has already been logged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Conversion failed")]
pub struct ConversionFailed;

/// Parses user-entered amount text into a finite, non-negative number.
pub fn parse_amount(text: &str) -> Result<f64, InvalidAmount> {
    let invalid = || InvalidAmount {
        input: text.to_string(),
    };
    let amount: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(invalid());
    }
    Ok(amount)
}

/// Converts `amount` from `from` into `to` using a single rate lookup.
#[instrument(skip(provider))]
pub async fn convert(
    provider: &dyn CurrencyRateProvider,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<Conversion, ConversionFailed> {
    let rate = match provider.get_rate(from, to).await {
        Ok(rate) => rate,
        Err(e) => {
            error!(error = %e, "Failed to fetch exchange rate.");
            return Err(ConversionFailed);
        }
    };

    let converted = amount * rate;
    info!("Converted {amount} {from} to {converted} {to}");

    Ok(Conversion {
        amount,
        from: from.to_string(),
        to: to.to_string(),
        rate,
        converted,
    })
}
