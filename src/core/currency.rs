//! Supported currencies and the rate provider abstraction

use crate::core::error::RateError;
use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;

/// A currency the converter knows how to display and request rates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency {
    pub name: &'static str,
    pub code: &'static str,
    pub symbol: &'static str,
}

impl Currency {
    pub const USD: Currency = Currency {
        name: "US Dollar",
        code: "USD",
        symbol: "$",
    };
    pub const EUR: Currency = Currency {
        name: "Euro",
        code: "EUR",
        symbol: "€",
    };
    pub const GBP: Currency = Currency {
        name: "British Pound",
        code: "GBP",
        symbol: "£",
    };
    pub const NOK: Currency = Currency {
        name: "Norwegian Krone",
        code: "NOK",
        symbol: "kr",
    };
    pub const RSD: Currency = Currency {
        name: "Serbian Dinar",
        code: "RSD",
        symbol: "дин.",
    };

    /// The fixed set offered to users, in display order.
    pub const SUPPORTED: [Currency; 5] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::NOK,
        Currency::RSD,
    ];

    /// Case-insensitive lookup among [`Currency::SUPPORTED`].
    pub fn from_code(code: &str) -> Option<Currency> {
        Self::SUPPORTED
            .into_iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) {}", self.name, self.code, self.symbol)
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| {
            let codes: Vec<&str> = Currency::SUPPORTED.iter().map(|c| c.code).collect();
            anyhow::anyhow!(
                "Unsupported currency: {} (expected one of {})",
                s,
                codes.join(", ")
            )
        })
    }
}

/// Source of live exchange rates.
///
/// `get_rate(from, to)` returns the multiplier such that
/// `amount_in_to = amount_in_from * rate`.
#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError>;
}
