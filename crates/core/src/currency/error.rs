//! Currency error types.

use rust_decimal::Decimal;
use tally_shared::types::Currency;
use thiserror::Error;

/// Errors raised while building a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Exchange rate must be positive.
    #[error("Exchange rate must be positive, got {0}")]
    InvalidExchangeRate(Decimal),

    /// A quote must name two different currencies.
    #[error("Source and target currencies must be different, got {0} for both")]
    SameCurrencyExchange(Currency),

    /// The converted amount does not fit in a decimal.
    #[error("Converting {0} overflows")]
    ConversionOverflow(Decimal),
}

impl CurrencyError {
    /// Returns the error code for structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidExchangeRate(_) => "INVALID_EXCHANGE_RATE",
            Self::SameCurrencyExchange(_) => "SAME_CURRENCY_EXCHANGE",
            Self::ConversionOverflow(_) => "CONVERSION_OVERFLOW",
        }
    }
}
