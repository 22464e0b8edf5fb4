//! Currency pair convention and typed conversion descriptors.
//!
//! The supported currencies form a single pair with a fixed direction:
//! USD is the base, RUB is the quote, and a pair rate `r` means
//! `1 USD = r RUB`. Base to quote multiplies by `r`, quote to base divides.
//!
//! Call sites never decide between multiplying and dividing themselves.
//! They ask the pair for a [`ConversionDescriptor`] and apply it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::Currency;

use super::error::CurrencyError;

/// A currency pair with a fixed base/quote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// One unit of this currency is quoted.
    pub base: Currency,
    /// Currency the quote is expressed in.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Rubles per US dollar.
    pub const RUB_PER_USD: Self = Self {
        base: Currency::Usd,
        quote: Currency::Rub,
    };

    /// Builds a descriptor converting `from` into `to` at pair rate `rate`.
    ///
    /// Same-currency conversions yield the identity descriptor and ignore
    /// `rate` entirely.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::InvalidExchangeRate` for a non-positive rate.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_core::currency::CurrencyPair;
    /// use tally_shared::types::Currency;
    ///
    /// let pair = CurrencyPair::RUB_PER_USD;
    /// let to_rub = pair.descriptor(Currency::Usd, Currency::Rub, dec!(100)).unwrap();
    /// assert_eq!(to_rub.apply(dec!(10)).unwrap(), dec!(1000));
    /// ```
    pub fn descriptor(
        &self,
        from: Currency,
        to: Currency,
        rate: Decimal,
    ) -> Result<ConversionDescriptor, CurrencyError> {
        if from == to {
            return Ok(ConversionDescriptor::identity(from));
        }
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidExchangeRate(rate));
        }

        let multiplier = if from == self.base {
            rate
        } else {
            Decimal::ONE / rate
        };

        Ok(ConversionDescriptor {
            from,
            to,
            multiplier,
        })
    }

    /// Normalises a quote given in either direction into this pair's rate.
    ///
    /// `USD -> RUB @ 90` and `RUB -> USD @ 1/90` both yield `90`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive rate or a same-currency quote.
    pub fn normalise(
        &self,
        from: Currency,
        to: Currency,
        rate: Decimal,
    ) -> Result<Decimal, CurrencyError> {
        if from == to {
            return Err(CurrencyError::SameCurrencyExchange(from));
        }
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidExchangeRate(rate));
        }
        if from == self.base {
            Ok(rate)
        } else {
            Ok(Decimal::ONE / rate)
        }
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self::RUB_PER_USD
    }
}

/// A typed, directional conversion: `to = from * multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionDescriptor {
    /// Currency the input amount is denominated in.
    pub from: Currency,
    /// Currency the output amount is denominated in.
    pub to: Currency,
    /// Factor applied to the input amount.
    pub multiplier: Decimal,
}

impl ConversionDescriptor {
    /// A conversion that leaves amounts untouched.
    #[must_use]
    pub const fn identity(currency: Currency) -> Self {
        Self {
            from: currency,
            to: currency,
            multiplier: Decimal::ONE,
        }
    }

    /// Returns true if this conversion does not change currency.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Converts `amount`. Identity conversions return the amount unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::ConversionOverflow` if the product does not
    /// fit in a decimal.
    pub fn apply(&self, amount: Decimal) -> Result<Decimal, CurrencyError> {
        if self.is_identity() {
            return Ok(amount);
        }
        amount
            .checked_mul(self.multiplier)
            .ok_or(CurrencyError::ConversionOverflow(amount))
    }

    /// Returns the conversion in the opposite direction.
    #[must_use]
    pub fn inverse(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        Self {
            from: self.to,
            to: self.from,
            multiplier: Decimal::ONE / self.multiplier,
        }
    }
}
