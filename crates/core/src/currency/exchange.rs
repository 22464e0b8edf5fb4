//! Exchange rate quotes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::Currency;

use super::error::CurrencyError;
use super::pair::CurrencyPair;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: Currency,
    /// Target currency code.
    pub to_currency: Currency,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(from_currency: Currency, to_currency: Currency, rate: Decimal) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
        }
    }

    /// Expresses this quote as a rate of `pair`, whichever way it was quoted.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive or same-currency quote.
    pub fn pair_rate(&self, pair: CurrencyPair) -> Result<Decimal, CurrencyError> {
        pair.normalise(self.from_currency, self.to_currency, self.rate)
    }
}
