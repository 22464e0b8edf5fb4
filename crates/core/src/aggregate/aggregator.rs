//! Currency-aware ledger aggregation.
//!
//! Every entry point validates the whole request first, converts each
//! classified record into the display currency, and only then sums.
//! Converted contributions have a bounded scale, so sums are exact and the
//! result does not depend on record order. Final figures are rounded once.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tally_shared::types::{CategoryId, Currency};
use tracing::{debug, warn};

use super::types::{AggregationRequest, CategoryTotal, LedgerSummary};
use crate::budget::{BudgetProgress, BudgetService};
use crate::currency::{CurrencyError, CurrencyService, INTERNAL_SCALE};
use crate::ledger::validation::{InvalidInputError, require_positive};
use crate::ledger::{Bucket, EntityRef, validate_record};

/// Upper bound for `AggregationRequest::decimal_places`.
pub const MAX_DECIMAL_PLACES: u32 = INTERNAL_SCALE;

/// One converted record.
#[derive(Debug, Clone, Copy)]
struct Contribution {
    /// Position of the source record in the request.
    index: usize,
    bucket: Bucket,
    amount: Decimal,
    entity: Option<EntityRef>,
    category: Option<CategoryId>,
}

/// Running sums of the four accumulating fields.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    income: Decimal,
    expense: Decimal,
    receivables: Decimal,
    payables: Decimal,
}

/// Adds `amount` to `total`, rejecting sums a decimal cannot hold exactly.
fn accumulate(
    total: &mut Decimal,
    amount: Decimal,
    field: impl FnOnce() -> String,
) -> Result<(), InvalidInputError> {
    *total = CurrencyService::add_exact(*total, amount).ok_or_else(|| {
        InvalidInputError::new(field(), "pushes a total beyond decimal precision")
    })?;
    Ok(())
}

/// Field a failed conversion is reported against.
fn conversion_field(prefix: String, err: &CurrencyError) -> String {
    match err {
        CurrencyError::ConversionOverflow(_) => format!("{prefix}.amount"),
        _ => prefix,
    }
}

impl Totals {
    fn add(&mut self, contribution: &Contribution) -> Result<(), InvalidInputError> {
        let total = match contribution.bucket {
            Bucket::Income => &mut self.income,
            Bucket::Expense => &mut self.expense,
            Bucket::Receivables => &mut self.receivables,
            Bucket::Payables => &mut self.payables,
        };
        accumulate(total, contribution.amount, || {
            format!("records[{}].amount", contribution.index)
        })
    }

    fn add_shortfall(&mut self, index: usize, shortfall: Decimal) -> Result<(), InvalidInputError> {
        accumulate(&mut self.receivables, shortfall, || format!("budgets[{index}]"))
    }

    fn finish(self, currency: Currency, decimal_places: u32) -> LedgerSummary {
        let round = |value| CurrencyService::round(value, decimal_places);
        LedgerSummary {
            currency,
            income: round(self.income),
            expense: round(self.expense),
            profit: round(self.income - self.expense),
            receivables: round(self.receivables),
            payables: round(self.payables),
        }
    }
}

/// Reduces record snapshots into summaries.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Checks every constraint of the request.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, naming its field.
    pub fn validate(request: &AggregationRequest) -> Result<(), InvalidInputError> {
        require_positive(|| "fallback_rate".to_string(), request.fallback_rate)?;

        if request.decimal_places > MAX_DECIMAL_PLACES {
            return Err(InvalidInputError::new(
                "decimal_places",
                format!("must be at most {MAX_DECIMAL_PLACES}, got {}", request.decimal_places),
            ));
        }

        if let Some(period) = request.period
            && period.from > period.to
        {
            return Err(InvalidInputError::new(
                "period",
                format!("must not end ({}) before it starts ({})", period.to, period.from),
            ));
        }

        for (index, record) in request.records.iter().enumerate() {
            validate_record(index, record)?;
        }
        for (index, target) in request.budgets.iter().enumerate() {
            BudgetService::validate(index, target)?;
        }

        Ok(())
    }

    /// Dashboard view: one summary over every record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if any part of the request is invalid.
    /// No partial result is produced.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_core::aggregate::{AggregationRequest, LedgerAggregator};
    /// use tally_core::ledger::{Record, RecordKind};
    /// use tally_shared::types::Currency;
    ///
    /// let records = vec![
    ///     Record::new(RecordKind::Inflow, dec!(500), Currency::Rub),
    ///     Record::new(RecordKind::Outflow, dec!(10), Currency::Rub).with_rate(dec!(0.01)),
    /// ];
    /// let request = AggregationRequest::new(records, Currency::Rub, dec!(100));
    /// let summary = LedgerAggregator::summarize(&request).unwrap();
    /// assert_eq!(summary.profit, dec!(-500));
    /// ```
    pub fn summarize(request: &AggregationRequest) -> Result<LedgerSummary, InvalidInputError> {
        let contributions = Self::prepare(request)?;

        let mut totals = Totals::default();
        for contribution in &contributions {
            totals.add(contribution)?;
        }
        for (index, progress) in Self::progress_of(request, &contributions)?.iter().enumerate() {
            totals.add_shortfall(index, progress.shortfall)?;
        }

        let summary = totals.finish(request.display_currency, request.decimal_places);
        debug!(
            records = request.records.len(),
            counted = contributions.len(),
            budgets = request.budgets.len(),
            currency = %summary.currency,
            "Ledger summary computed"
        );
        Ok(summary)
    }

    /// Project and counterparty views: one summary per linked entity.
    ///
    /// Unlinked records are skipped. An entity with a budget but no records
    /// still appears, carrying its shortfall as receivables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if any part of the request is invalid.
    pub fn summarize_by_entity(
        request: &AggregationRequest,
    ) -> Result<BTreeMap<EntityRef, LedgerSummary>, InvalidInputError> {
        let contributions = Self::prepare(request)?;

        let mut by_entity: BTreeMap<EntityRef, Totals> = BTreeMap::new();
        for contribution in &contributions {
            if let Some(entity) = contribution.entity {
                by_entity.entry(entity).or_default().add(contribution)?;
            }
        }
        for (index, progress) in Self::progress_of(request, &contributions)?.iter().enumerate() {
            by_entity
                .entry(progress.entity)
                .or_default()
                .add_shortfall(index, progress.shortfall)?;
        }

        debug!(
            records = request.records.len(),
            entities = by_entity.len(),
            "Entity summaries computed"
        );
        Ok(by_entity
            .into_iter()
            .map(|(entity, totals)| {
                (
                    entity,
                    totals.finish(request.display_currency, request.decimal_places),
                )
            })
            .collect())
    }

    /// A single project or counterparty view.
    ///
    /// An entity with nothing linked to it yields a zero summary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if any part of the request is invalid.
    pub fn summarize_entity(
        request: &AggregationRequest,
        entity: EntityRef,
    ) -> Result<LedgerSummary, InvalidInputError> {
        Ok(Self::summarize_by_entity(request)?
            .remove(&entity)
            .unwrap_or_else(|| LedgerSummary::zero(request.display_currency)))
    }

    /// Confirmed expense per category, uncategorised records first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if any part of the request is invalid.
    pub fn summarize_by_category(
        request: &AggregationRequest,
    ) -> Result<Vec<CategoryTotal>, InvalidInputError> {
        let contributions = Self::prepare(request)?;

        let mut by_category: BTreeMap<Option<CategoryId>, Decimal> = BTreeMap::new();
        for contribution in contributions
            .iter()
            .filter(|c| c.bucket == Bucket::Expense)
        {
            accumulate(
                by_category.entry(contribution.category).or_default(),
                contribution.amount,
                || format!("records[{}].amount", contribution.index),
            )?;
        }

        Ok(by_category
            .into_iter()
            .map(|(category_id, expense)| CategoryTotal {
                category_id,
                expense: CurrencyService::round(expense, request.decimal_places),
            })
            .collect())
    }

    /// Progress of every budget target against confirmed income.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if any part of the request is invalid.
    pub fn budget_progress(
        request: &AggregationRequest,
    ) -> Result<Vec<BudgetProgress>, InvalidInputError> {
        let contributions = Self::prepare(request)?;
        let dp = request.decimal_places;

        Ok(Self::progress_of(request, &contributions)?
            .into_iter()
            .zip(&request.budgets)
            .map(|(progress, target)| {
                BudgetService::progress(
                    target,
                    CurrencyService::round(progress.budgeted, dp),
                    CurrencyService::round(progress.received, dp),
                )
            })
            .collect())
    }

    /// Validates the request and converts every counted record.
    fn prepare(request: &AggregationRequest) -> Result<Vec<Contribution>, InvalidInputError> {
        Self::validate(request).inspect_err(|err| {
            warn!(field = %err.field, reason = %err.reason, "Rejected aggregation request");
        })?;

        let converter = request.converter();
        let mut contributions = Vec::with_capacity(request.records.len());

        for (index, record) in request.records.iter().enumerate() {
            if !request.includes(record) {
                continue;
            }
            let Some(bucket) = record.classify() else {
                continue;
            };
            let amount = converter
                .convert(record.money(), record.fx_override)
                .map_err(|err| {
                    InvalidInputError::new(
                        conversion_field(format!("records[{index}]"), &err),
                        err.to_string(),
                    )
                })?;

            contributions.push(Contribution {
                index,
                bucket,
                amount,
                entity: record.linked_entity,
                category: record.category_id,
            });
        }

        Ok(contributions)
    }

    /// Budget progress in request order, at internal precision.
    fn progress_of(
        request: &AggregationRequest,
        contributions: &[Contribution],
    ) -> Result<Vec<BudgetProgress>, InvalidInputError> {
        if request.budgets.is_empty() {
            return Ok(Vec::new());
        }

        let mut received: BTreeMap<EntityRef, Decimal> = BTreeMap::new();
        for contribution in contributions
            .iter()
            .filter(|c| c.bucket == Bucket::Income)
        {
            if let Some(entity) = contribution.entity {
                accumulate(received.entry(entity).or_default(), contribution.amount, || {
                    format!("records[{}].amount", contribution.index)
                })?;
            }
        }

        let converter = request.converter();
        request
            .budgets
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let budgeted = BudgetService::budgeted_in_display(target, &converter).map_err(
                    |err| {
                        InvalidInputError::new(
                            conversion_field(format!("budgets[{index}]"), &err),
                            err.to_string(),
                        )
                    },
                )?;
                let confirmed = received.get(&target.entity).copied().unwrap_or_default();
                Ok(BudgetService::progress(target, budgeted, confirmed))
            })
            .collect()
    }
}
