//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, ConversionFailed, convert, parse_amount};
pub use currency::{Currency, CurrencyRateProvider};
pub use error::{InvalidAmount, RateError};
