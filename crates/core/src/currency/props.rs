//! Property-based tests for currency operations.
//!
//! - Identity conversion ignores the rate
//! - Round-trip through the reciprocal rate reproduces the amount
//! - Cross-currency results are bounded to `INTERNAL_SCALE`

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::Currency;

use super::conversion::{INTERNAL_SCALE, to_display};
use super::pair::CurrencyPair;
use super::service::CurrencyService;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive pair rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Rub), Just(Currency::Usd)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Same-currency conversion returns the amount unchanged for any rate,
    /// including rates that would be rejected for a real conversion.
    #[test]
    fn prop_identity_conversion_ignores_rate(
        amount in positive_amount(),
        currency in currency(),
        rate in -1_000i64..1_000i64,
    ) {
        let result = to_display(
            amount,
            currency,
            currency,
            CurrencyPair::RUB_PER_USD,
            Decimal::from(rate),
        );
        prop_assert_eq!(result, Ok(amount));
    }

    /// Converting A → B and back with the reciprocal reproduces the amount
    /// to the cent.
    #[test]
    fn prop_round_trip_conversion(
        amount in positive_amount(),
        rate in positive_rate(),
        from in currency(),
    ) {
        let pair = CurrencyPair::RUB_PER_USD;
        let forward = pair.descriptor(from, from.other(), rate).unwrap();
        let back = forward.inverse();

        let round_trip = back.apply(forward.apply(amount).unwrap()).unwrap();
        prop_assert_eq!(CurrencyService::round(round_trip, 2), amount);
    }

    /// Cross-currency contributions carry at most `INTERNAL_SCALE` places.
    #[test]
    fn prop_cross_currency_scale_is_bounded(
        amount in positive_amount(),
        rate in positive_rate(),
        from in currency(),
    ) {
        let result = to_display(amount, from, from.other(), CurrencyPair::RUB_PER_USD, rate)
            .unwrap();
        prop_assert!(result.scale() <= INTERNAL_SCALE);
        prop_assert!(result >= Decimal::ZERO);
    }

    /// Base → quote multiplies and quote → base divides, never the reverse.
    #[test]
    fn prop_direction_follows_pair(
        amount in positive_amount(),
        rate in (2i64..10_000i64).prop_map(Decimal::from),
    ) {
        let pair = CurrencyPair::RUB_PER_USD;
        let in_rub = pair.descriptor(Currency::Usd, Currency::Rub, rate).unwrap().apply(amount).unwrap();
        let in_usd = pair.descriptor(Currency::Rub, Currency::Usd, rate).unwrap().apply(amount).unwrap();
        prop_assert!(in_rub > amount);
        prop_assert!(in_usd < amount);
    }
}
