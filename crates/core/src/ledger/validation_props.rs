//! Property-based tests for record validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::Currency;

use super::record::{Record, RecordKind};
use super::validation::validate_record;

/// Strategy to generate a valid positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    // Generate amounts from 0.01 to 1,000,000.00
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate a positive amount with 9 to 12 significant
/// fractional digits.
fn over_precise_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64, 9u32..=12)
        .prop_filter("last digit must be significant", |(mantissa, _)| mantissa % 10 != 0)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn kind_strategy() -> impl Strategy<Value = RecordKind> {
    prop_oneof![
        Just(RecordKind::Inflow),
        Just(RecordKind::Outflow),
        Just(RecordKind::Transfer),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any record with positive amount and rate passes validation.
    #[test]
    fn prop_positive_record_accepted(
        kind in kind_strategy(),
        amount in positive_amount(),
        rate in positive_amount(),
        is_pending in any::<bool>(),
    ) {
        let mut record = Record::new(kind, amount, Currency::Rub).with_rate(rate);
        record.is_pending = is_pending;
        prop_assert!(validate_record(0, &record).is_ok());
    }

    /// Zero and negative amounts are rejected, transfers included.
    #[test]
    fn prop_non_positive_amount_rejected(
        kind in kind_strategy(),
        amount in non_positive_amount(),
        index in 0usize..1_000,
    ) {
        let record = Record::new(kind, amount, Currency::Usd);
        let err = validate_record(index, &record).unwrap_err();
        prop_assert_eq!(err.field, format!("records[{index}].amount"));
    }

    /// Zero and negative rates are rejected.
    #[test]
    fn prop_non_positive_rate_rejected(
        amount in positive_amount(),
        rate in non_positive_amount(),
    ) {
        let record = Record::new(RecordKind::Outflow, amount, Currency::Rub).with_rate(rate);
        let err = validate_record(7, &record).unwrap_err();
        prop_assert_eq!(err.field, "records[7].rate");
    }

    /// Amounts finer than eight decimal places are rejected.
    #[test]
    fn prop_over_precise_amount_rejected(
        kind in kind_strategy(),
        amount in over_precise_amount(),
        index in 0usize..1_000,
    ) {
        let record = Record::new(kind, amount, Currency::Rub);
        let err = validate_record(index, &record).unwrap_err();
        prop_assert_eq!(err.field, format!("records[{index}].amount"));
    }
}
