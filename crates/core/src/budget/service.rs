//! Budget service for shortfall calculation and validation.

use rust_decimal::Decimal;

use super::types::{BudgetProgress, BudgetTarget, ProgressStatus};
use crate::currency::{CurrencyError, DisplayConverter};
use crate::ledger::validation::{InvalidInputError, require_positive, require_precision};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Converts the committed amount into the converter's display currency.
    ///
    /// # Errors
    ///
    /// Returns an error when the applicable rate is not positive.
    pub fn budgeted_in_display(
        target: &BudgetTarget,
        converter: &DisplayConverter,
    ) -> Result<Decimal, CurrencyError> {
        converter.convert(target.money(), target.fx_override)
    }

    /// Money still owed up to the budget ceiling.
    ///
    /// Both figures must already be in the same currency. The result is
    /// `budgeted - received` when positive, zero otherwise.
    #[must_use]
    pub fn shortfall(budgeted: Decimal, received: Decimal) -> Decimal {
        (budgeted - received).max(Decimal::ZERO)
    }

    /// Builds the progress report of one budget.
    ///
    /// Utilization saturates at `Decimal::MAX` when the ratio does not fit.
    #[must_use]
    pub fn progress(target: &BudgetTarget, budgeted: Decimal, received: Decimal) -> BudgetProgress {
        let status = match received.cmp(&budgeted) {
            std::cmp::Ordering::Less => ProgressStatus::Outstanding,
            std::cmp::Ordering::Equal => ProgressStatus::Fulfilled,
            std::cmp::Ordering::Greater => ProgressStatus::Exceeded,
        };

        let utilization_percent = if budgeted.is_zero() {
            Decimal::ZERO
        } else {
            received
                .checked_div(budgeted)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
                .round_dp(2)
        };

        BudgetProgress {
            budget_id: target.id,
            entity: target.entity,
            budgeted,
            received,
            shortfall: Self::shortfall(budgeted, received),
            utilization_percent,
            status,
        }
    }

    /// Validates a budget target at position `index` of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` for a non-positive amount or override rate,
    /// and for an amount finer than the internal conversion scale.
    pub fn validate(index: usize, target: &BudgetTarget) -> Result<(), InvalidInputError> {
        require_positive(|| format!("budgets[{index}].amount"), target.amount)?;
        require_precision(|| format!("budgets[{index}].amount"), target.amount)?;
        if let Some(rate) = target.fx_override {
            require_positive(|| format!("budgets[{index}].fx_override"), rate)?;
        }
        Ok(())
    }
}
