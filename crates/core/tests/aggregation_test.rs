//! Integration tests for ledger aggregation.
//!
//! Requests are decoded from JSON the way a storage snapshot would arrive,
//! then reduced through the public API only.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::aggregate::{
    AggregationRequest, EntitySummary, LedgerAggregator, LedgerSummary, SummaryCache,
};
use tally_core::budget::ProgressStatus;
use tally_core::ledger::EntityRef;
use tally_shared::types::{Currency, ProjectId};
use tally_shared::AppError;

const PROJECT: &str = "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f00";

fn project() -> EntityRef {
    EntityRef::Project(PROJECT.parse::<ProjectId>().unwrap())
}

/// Decodes a request and fails loudly on malformed fixtures.
fn request(json: &str) -> AggregationRequest {
    serde_json::from_str(json).expect("fixture should decode")
}

// ============================================================================
// Dashboard
// ============================================================================

#[test]
fn test_dashboard_from_json_snapshot() {
    let request = request(
        r#"{
            "display_currency": "RUB",
            "fallback_rate": "100",
            "records": [
                {
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f01",
                    "amount": "500",
                    "settlement_currency": "RUB",
                    "rate": "1",
                    "kind": "inflow"
                },
                {
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f02",
                    "amount": "10",
                    "settlement_currency": "RUB",
                    "rate": "0.01",
                    "kind": "outflow"
                }
            ]
        }"#,
    );

    let summary = LedgerAggregator::summarize(&request).unwrap();

    assert_eq!(
        summary,
        LedgerSummary {
            currency: Currency::Rub,
            income: dec!(500),
            expense: dec!(1000),
            profit: dec!(-500),
            receivables: Decimal::ZERO,
            payables: Decimal::ZERO,
        }
    );
}

#[test]
fn test_dashboard_in_usd_with_budget() {
    let request = request(&format!(
        r#"{{
            "display_currency": "USD",
            "fallback_rate": "80",
            "decimal_places": 2,
            "records": [
                {{
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f03",
                    "amount": "4000",
                    "settlement_currency": "RUB",
                    "kind": "inflow",
                    "linked_entity": {{ "type": "project", "id": "{PROJECT}" }}
                }},
                {{
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f04",
                    "amount": "25",
                    "settlement_currency": "USD",
                    "kind": "outflow",
                    "is_pending": true
                }}
            ],
            "budgets": [
                {{
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f05",
                    "entity": {{ "type": "project", "id": "{PROJECT}" }},
                    "amount": "120",
                    "currency": "USD"
                }}
            ]
        }}"#
    ));

    let summary = LedgerAggregator::summarize(&request).unwrap();

    // 4000 RUB / 80 = 50 USD received against 120 USD budgeted
    assert_eq!(summary.income, dec!(50));
    assert_eq!(summary.payables, dec!(25));
    assert_eq!(summary.receivables, dec!(70));

    let progress = LedgerAggregator::budget_progress(&request).unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].entity, project());
    assert_eq!(progress[0].utilization_percent, dec!(41.67));
    assert_eq!(progress[0].status, ProgressStatus::Outstanding);
}

// ============================================================================
// Entity view
// ============================================================================

#[test]
fn test_entity_view_serialises_as_list() {
    let request = request(&format!(
        r#"{{
            "display_currency": "RUB",
            "fallback_rate": "100",
            "records": [
                {{
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f06",
                    "amount": "1.5",
                    "settlement_currency": "USD",
                    "kind": "inflow",
                    "fx_override": "90",
                    "linked_entity": {{ "type": "project", "id": "{PROJECT}" }}
                }}
            ]
        }}"#
    ));

    let entities: Vec<EntitySummary> = LedgerAggregator::summarize_by_entity(&request)
        .unwrap()
        .into_iter()
        .map(EntitySummary::from)
        .collect();

    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity, project());
    assert_eq!(entities[0].summary.income, dec!(135));

    let json = serde_json::to_value(&entities).unwrap();
    assert_eq!(json[0]["entity"]["type"], "project");
    let income: Decimal = json[0]["income"].as_str().unwrap().parse().unwrap();
    assert_eq!(income, dec!(135));
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn test_invalid_record_maps_to_validation_error() {
    let request = request(
        r#"{
            "display_currency": "RUB",
            "fallback_rate": "100",
            "records": [
                {
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f07",
                    "amount": "0",
                    "settlement_currency": "RUB",
                    "kind": "inflow"
                }
            ]
        }"#,
    );

    let err = LedgerAggregator::summarize(&request).unwrap_err();
    assert_eq!(err.field, "records[0].amount");

    let app: AppError = err.into();
    assert_eq!(app.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_unknown_currency_fails_to_decode() {
    let json = r#"{
        "display_currency": "EUR",
        "fallback_rate": "100",
        "records": []
    }"#;
    assert!(serde_json::from_str::<AggregationRequest>(json).is_err());
}

// ============================================================================
// Cache
// ============================================================================

#[test]
fn test_cached_summary_matches_direct() {
    let request = request(
        r#"{
            "display_currency": "USD",
            "fallback_rate": "3",
            "decimal_places": 4,
            "records": [
                {
                    "id": "01890f5e-7f6a-7cc2-9e4b-2b0c7d6a1f08",
                    "amount": "10",
                    "settlement_currency": "RUB",
                    "kind": "inflow"
                }
            ]
        }"#,
    );
    let cache = SummaryCache::new();

    let direct = LedgerAggregator::summarize(&request).unwrap();
    let first = cache.summarize(&request).unwrap();
    let second = cache.summarize(&request).unwrap();

    assert_eq!(*first.summary, direct);
    assert!(second.cached);
    assert_eq!(direct.income, dec!(3.3333));
}
