//! Property-based tests for aggregation.
//!
//! - Record order never changes a summary
//! - Same-currency records sum exactly
//! - Pending and transfer records never touch income or expense
//! - Raising a budget never lowers receivables

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{Currency, ProjectId};

use super::aggregator::LedgerAggregator;
use super::types::AggregationRequest;
use crate::budget::BudgetTarget;
use crate::ledger::{EntityRef, Record, RecordKind};

/// Strategy to generate positive amounts with up to 8 fractional digits
/// and up to 15 integer digits.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000_000i64, 0u32..=8)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy to generate pair rates (0.0001 to 1000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Rub), Just(Currency::Usd)]
}

fn kind() -> impl Strategy<Value = RecordKind> {
    prop_oneof![
        Just(RecordKind::Inflow),
        Just(RecordKind::Outflow),
        Just(RecordKind::Transfer),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    (
        kind(),
        positive_amount(),
        currency(),
        any::<bool>(),
        proptest::option::of(positive_rate()),
    )
        .prop_map(|(kind, amount, currency, pending, fx_override)| {
            let mut record = Record::new(kind, amount, currency);
            record.is_pending = pending;
            record.fx_override = fx_override;
            record
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Reordering the records yields the identical summary.
    #[test]
    fn prop_summary_is_order_independent(
        records in prop::collection::vec(record(), 0..30),
        display in currency(),
        fallback in positive_rate(),
        shift in 0usize..64,
    ) {
        let forward = AggregationRequest::new(records.clone(), display, fallback);

        let mut shuffled = records;
        shuffled.reverse();
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left(shift % len);
        }
        let backward = AggregationRequest::new(shuffled, display, fallback);

        prop_assert_eq!(
            LedgerAggregator::summarize(&forward).unwrap(),
            LedgerAggregator::summarize(&backward).unwrap()
        );
    }

    /// Records already in the display currency sum to their exact total.
    #[test]
    fn prop_same_currency_sums_exactly(
        amounts in prop::collection::vec(positive_amount(), 0..30),
        display in currency(),
        fallback in positive_rate(),
    ) {
        let expected: Decimal = amounts.iter().copied().sum();
        let records = amounts
            .into_iter()
            .map(|amount| Record::new(RecordKind::Inflow, amount, display))
            .collect();
        let request = AggregationRequest::new(records, display, fallback);

        let summary = LedgerAggregator::summarize(&request).unwrap();
        prop_assert_eq!(summary.income, expected);
        prop_assert_eq!(summary.profit, expected);
    }

    /// Only confirmed inflows and outflows reach income and expense.
    #[test]
    fn prop_open_items_and_transfers_excluded(
        records in prop::collection::vec(record(), 0..30),
        fallback in positive_rate(),
    ) {
        let confirmed: Vec<Record> = records
            .iter()
            .filter(|r| !r.is_pending && r.kind != RecordKind::Transfer)
            .cloned()
            .collect();

        let all = LedgerAggregator::summarize(
            &AggregationRequest::new(records, Currency::Rub, fallback),
        ).unwrap();
        let only_confirmed = LedgerAggregator::summarize(
            &AggregationRequest::new(confirmed, Currency::Rub, fallback),
        ).unwrap();

        prop_assert_eq!(all.income, only_confirmed.income);
        prop_assert_eq!(all.expense, only_confirmed.expense);
        prop_assert_eq!(only_confirmed.receivables, Decimal::ZERO);
        prop_assert_eq!(only_confirmed.payables, Decimal::ZERO);
    }

    /// Increasing a budget target with income held fixed never lowers
    /// receivables.
    #[test]
    fn prop_budget_shortfall_monotonic(
        income in positive_amount(),
        budget in positive_amount(),
        increase in 0i64..100_000_000i64,
        budget_currency in currency(),
        fallback in positive_rate(),
    ) {
        let project = EntityRef::Project(ProjectId::new());
        let records = vec![Record::new(RecordKind::Inflow, income, Currency::Rub).linked_to(project)];
        let raised = budget + Decimal::new(increase, 2);

        let lower = AggregationRequest::new(records.clone(), Currency::Rub, fallback)
            .with_budgets(vec![BudgetTarget::new(project, budget, budget_currency)]);
        let higher = AggregationRequest::new(records, Currency::Rub, fallback)
            .with_budgets(vec![BudgetTarget::new(project, raised, budget_currency)]);

        let lower = LedgerAggregator::summarize(&lower).unwrap();
        let higher = LedgerAggregator::summarize(&higher).unwrap();
        prop_assert!(higher.receivables >= lower.receivables);
        prop_assert_eq!(higher.income, lower.income);
    }
}
