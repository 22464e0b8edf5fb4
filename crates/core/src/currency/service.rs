//! Currency service for rounding and exact summation.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Decimal arithmetic shared by every total.
///
/// All rounding uses Banker's Rounding (MidpointNearestEven).
pub struct CurrencyService;

impl CurrencyService {
    /// Round a decimal value using Banker's Rounding.
    ///
    /// - Rounds 2.5 → 2 (to nearest even)
    /// - Rounds 3.5 → 4 (to nearest even)
    /// - Rounds 2.25 → 2.2 (to nearest even at 1 decimal)
    #[must_use]
    pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
    }

    /// Adds two amounts without losing a digit.
    ///
    /// Returns `None` when the sum does not fit in a decimal, including the
    /// case where it would only fit after dropping fractional digits.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    /// use tally_core::currency::CurrencyService;
    ///
    /// assert_eq!(CurrencyService::add_exact(dec!(1.5), dec!(0.25)), Some(dec!(1.75)));
    /// assert_eq!(CurrencyService::add_exact(Decimal::MAX, dec!(1)), None);
    /// ```
    #[must_use]
    pub fn add_exact(total: Decimal, amount: Decimal) -> Option<Decimal> {
        let scale = total.scale().max(amount.scale());
        total
            .checked_add(amount)
            .filter(|sum| sum.scale() >= scale)
    }
}
