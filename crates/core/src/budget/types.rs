//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{BudgetId, Currency, Money};

use crate::ledger::EntityRef;

/// A committed budget attached to a project-like entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetTarget {
    /// Budget ID.
    pub id: BudgetId,
    /// Entity whose confirmed income is measured against the budget.
    pub entity: EntityRef,
    /// Committed amount.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Budget-specific pair rate replacing the fallback rate.
    #[serde(default)]
    pub fx_override: Option<Decimal>,
}

impl BudgetTarget {
    /// Creates a budget target without a rate override.
    #[must_use]
    pub fn new(entity: EntityRef, amount: Decimal, currency: Currency) -> Self {
        Self {
            id: BudgetId::new(),
            entity,
            amount,
            currency,
            fx_override: None,
        }
    }

    /// Committed amount with its currency.
    #[must_use]
    pub const fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }

    /// Sets a budget-specific pair rate.
    #[must_use]
    pub fn with_fx_override(mut self, rate: Decimal) -> Self {
        self.fx_override = Some(rate);
        self
    }
}

/// How far confirmed income has come towards a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Entity the budget belongs to.
    pub entity: EntityRef,
    /// Budget in the display currency.
    pub budgeted: Decimal,
    /// Confirmed income in the display currency.
    pub received: Decimal,
    /// Amount still owed up to the budget ceiling (never negative).
    pub shortfall: Decimal,
    /// Received as a percentage of budgeted.
    pub utilization_percent: Decimal,
    /// Progress status.
    pub status: ProgressStatus,
}

/// Progress status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Confirmed income is below the budget.
    Outstanding,
    /// Confirmed income matches the budget exactly.
    Fulfilled,
    /// Confirmed income exceeds the budget.
    Exceeded,
}
