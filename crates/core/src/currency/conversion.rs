//! Currency conversion into a display currency.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Each converted contribution is rounded to `INTERNAL_SCALE` places
//! - Use banker's rounding (round half to even)
//! - Final totals are rounded once, after summation
//!
//! Bounding the scale of every addend keeps decimal summation exact, so
//! totals do not depend on the order records are visited in.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use tally_shared::types::{Currency, Money};

use super::error::CurrencyError;
use super::pair::CurrencyPair;

/// Scale every converted contribution is rounded to before summation.
pub const INTERNAL_SCALE: u32 = 8;

/// Converts `amount` from `native` into `display` at pair rate `pair_rate`.
///
/// Same-currency amounts are returned exactly as given, whatever the rate;
/// callers bound their scale to [`INTERNAL_SCALE`] before summing them.
/// Anything else goes through the pair's descriptor and is rounded to
/// [`INTERNAL_SCALE`].
///
/// # Errors
///
/// Returns `CurrencyError::InvalidExchangeRate` when a cross-currency
/// conversion is requested with a non-positive rate, and
/// `CurrencyError::ConversionOverflow` when the converted amount does not
/// fit in a decimal.
pub fn to_display(
    amount: Decimal,
    native: Currency,
    display: Currency,
    pair: CurrencyPair,
    pair_rate: Decimal,
) -> Result<Decimal, CurrencyError> {
    if native == display {
        return Ok(amount);
    }
    let descriptor = pair.descriptor(native, display, pair_rate)?;
    Ok(descriptor
        .apply(amount)?
        .round_dp_with_strategy(INTERNAL_SCALE, RoundingStrategy::MidpointNearestEven))
}

/// Converts amounts into one display currency with a fallback pair rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConverter {
    /// Currency results are expressed in.
    pub display: Currency,
    /// Pair convention the rates are quoted in.
    pub pair: CurrencyPair,
    /// Pair rate used when no override is supplied.
    pub fallback_rate: Decimal,
}

impl DisplayConverter {
    /// Creates a converter using the RUB-per-USD convention.
    #[must_use]
    pub const fn new(display: Currency, fallback_rate: Decimal) -> Self {
        Self {
            display,
            pair: CurrencyPair::RUB_PER_USD,
            fallback_rate,
        }
    }

    /// Converts `money` into the display currency, preferring `fx_override`
    /// over the fallback rate.
    ///
    /// # Errors
    ///
    /// Returns an error when the applicable rate is not positive.
    pub fn convert(
        &self,
        money: Money,
        fx_override: Option<Decimal>,
    ) -> Result<Decimal, CurrencyError> {
        to_display(
            money.amount,
            money.currency,
            self.display,
            self.pair,
            fx_override.unwrap_or(self.fallback_rate),
        )
    }
}
