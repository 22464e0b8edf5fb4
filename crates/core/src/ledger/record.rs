//! Financial record domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{
    AccountId, CategoryId, CounterpartyId, Currency, Money, ProjectId, RecordId,
};

/// Direction of a financial movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Money coming in.
    Inflow,
    /// Money going out.
    Outflow,
    /// Money moved between own accounts. Never part of profit or loss.
    Transfer,
}

/// The entity a record or budget is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    /// A project.
    Project(ProjectId),
    /// A counterparty (client or supplier).
    Counterparty(CounterpartyId),
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project:{id}"),
            Self::Counterparty(id) => write!(f, "counterparty:{id}"),
        }
    }
}

/// Summary field a record contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Confirmed inflow.
    Income,
    /// Confirmed outflow.
    Expense,
    /// Pending inflow.
    Receivables,
    /// Pending outflow.
    Payables,
}

fn default_rate() -> Decimal {
    Decimal::ONE
}

/// A single financial movement as read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Record ID.
    pub id: RecordId,
    /// Positive amount in the record's native currency.
    pub amount: Decimal,
    /// Explicit native currency. When absent it is inferred from `rate`.
    #[serde(default)]
    pub native_currency: Option<Currency>,
    /// Currency of the account the record posts against.
    pub settlement_currency: Currency,
    /// Legacy native → settlement factor; `1` means same currency.
    #[serde(default = "default_rate")]
    pub rate: Decimal,
    /// Record-specific pair rate replacing the fallback rate.
    #[serde(default)]
    pub fx_override: Option<Decimal>,
    /// Direction of the movement.
    pub kind: RecordKind,
    /// Planned, not yet confirmed.
    #[serde(default)]
    pub is_pending: bool,
    /// Owning project or counterparty.
    #[serde(default)]
    pub linked_entity: Option<EntityRef>,
    /// Settlement account.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Date of the movement.
    #[serde(default)]
    pub occurred_on: Option<NaiveDate>,
}

impl Record {
    /// Creates a confirmed record in its settlement currency.
    #[must_use]
    pub fn new(kind: RecordKind, amount: Decimal, settlement_currency: Currency) -> Self {
        Self {
            id: RecordId::new(),
            amount,
            native_currency: None,
            settlement_currency,
            rate: Decimal::ONE,
            fx_override: None,
            kind,
            is_pending: false,
            linked_entity: None,
            account_id: None,
            category_id: None,
            occurred_on: None,
        }
    }

    /// Marks the record as planned.
    #[must_use]
    pub fn pending(mut self) -> Self {
        self.is_pending = true;
        self
    }

    /// Sets the legacy settlement rate.
    #[must_use]
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the native currency explicitly.
    #[must_use]
    pub fn in_native(mut self, currency: Currency) -> Self {
        self.native_currency = Some(currency);
        self
    }

    /// Sets a record-specific pair rate.
    #[must_use]
    pub fn with_fx_override(mut self, rate: Decimal) -> Self {
        self.fx_override = Some(rate);
        self
    }

    /// Links the record to a project or counterparty.
    #[must_use]
    pub fn linked_to(mut self, entity: EntityRef) -> Self {
        self.linked_entity = Some(entity);
        self
    }

    /// Files the record under a category.
    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category_id = Some(category);
        self
    }

    /// Dates the record.
    #[must_use]
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.occurred_on = Some(date);
        self
    }

    /// Currency the amount is denominated in.
    ///
    /// An explicit `native_currency` always wins. Otherwise `rate == 1`
    /// means the settlement currency and any other rate means the other
    /// currency of the pair.
    #[must_use]
    pub fn native_currency(&self) -> Currency {
        match self.native_currency {
            Some(currency) => currency,
            None if self.rate == Decimal::ONE => self.settlement_currency,
            None => self.settlement_currency.other(),
        }
    }

    /// Amount in the native currency.
    #[must_use]
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.native_currency())
    }

    /// Summary field this record contributes to, if any.
    #[must_use]
    pub const fn classify(&self) -> Option<Bucket> {
        match (self.kind, self.is_pending) {
            (RecordKind::Transfer, _) => None,
            (RecordKind::Inflow, false) => Some(Bucket::Income),
            (RecordKind::Outflow, false) => Some(Bucket::Expense),
            (RecordKind::Inflow, true) => Some(Bucket::Receivables),
            (RecordKind::Outflow, true) => Some(Bucket::Payables),
        }
    }

    /// Returns true if the record falls inside `[from, to]`.
    ///
    /// Undated records always match; planned movements are often undated.
    #[must_use]
    pub fn within(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.occurred_on
            .is_none_or(|date| date >= from && date <= to)
    }
}
