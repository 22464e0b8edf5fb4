//! Aggregation input and output types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, Currency};

use crate::budget::BudgetTarget;
use crate::currency::DisplayConverter;
use crate::ledger::{EntityRef, Record};

fn default_decimal_places() -> u32 {
    2
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
}

/// An immutable snapshot to aggregate, plus how to express the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationRequest {
    /// Records to reduce.
    pub records: Vec<Record>,
    /// Currency every figure is expressed in.
    pub display_currency: Currency,
    /// Pair rate (RUB per USD) used when nothing overrides it.
    pub fallback_rate: Decimal,
    /// Budget targets of the entities in `records`.
    #[serde(default)]
    pub budgets: Vec<BudgetTarget>,
    /// Decimal places of the final figures.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Optional date filter.
    #[serde(default)]
    pub period: Option<Period>,
}

impl AggregationRequest {
    /// Creates a request without budgets or period filter.
    #[must_use]
    pub fn new(records: Vec<Record>, display_currency: Currency, fallback_rate: Decimal) -> Self {
        Self {
            records,
            display_currency,
            fallback_rate,
            budgets: Vec::new(),
            decimal_places: default_decimal_places(),
            period: None,
        }
    }

    /// Attaches budget targets.
    #[must_use]
    pub fn with_budgets(mut self, budgets: Vec<BudgetTarget>) -> Self {
        self.budgets = budgets;
        self
    }

    /// Restricts the reduction to records dated within `[from, to]`.
    #[must_use]
    pub fn with_period(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.period = Some(Period { from, to });
        self
    }

    /// Sets the precision of the final figures.
    #[must_use]
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Converter for this request's display currency and fallback rate.
    #[must_use]
    pub const fn converter(&self) -> DisplayConverter {
        DisplayConverter::new(self.display_currency, self.fallback_rate)
    }

    /// Returns true if `record` passes the period filter.
    #[must_use]
    pub fn includes(&self, record: &Record) -> bool {
        self.period
            .is_none_or(|period| record.within(period.from, period.to))
    }
}

/// Income, expense, profit, receivables, and payables in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Currency of every figure.
    pub currency: Currency,
    /// Confirmed inflows.
    pub income: Decimal,
    /// Confirmed outflows.
    pub expense: Decimal,
    /// `income - expense`.
    pub profit: Decimal,
    /// Pending inflows plus budget shortfalls.
    pub receivables: Decimal,
    /// Pending outflows.
    pub payables: Decimal,
}

impl LedgerSummary {
    /// A summary with every figure at zero.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            currency,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            profit: Decimal::ZERO,
            receivables: Decimal::ZERO,
            payables: Decimal::ZERO,
        }
    }
}

/// Summary of one project or counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    /// The entity.
    pub entity: EntityRef,
    /// Its summary.
    #[serde(flatten)]
    pub summary: LedgerSummary,
}

impl From<(EntityRef, LedgerSummary)> for EntitySummary {
    fn from((entity, summary): (EntityRef, LedgerSummary)) -> Self {
        Self { entity, summary }
    }
}

/// Confirmed expense of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category, `None` for uncategorised records.
    pub category_id: Option<CategoryId>,
    /// Confirmed expense in the display currency.
    pub expense: Decimal,
}
