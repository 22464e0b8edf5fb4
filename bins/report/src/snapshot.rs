//! Snapshot loading.
//!
//! A snapshot is a JSON document of records and budgets exported from
//! storage. It may pin its own display currency and rate; anything it leaves
//! out comes from configuration.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tally_core::aggregate::AggregationRequest;
use tally_core::budget::BudgetTarget;
use tally_core::currency::{CurrencyPair, ExchangeRate};
use tally_core::ledger::Record;
use tally_shared::config::AggregationConfig;
use tally_shared::types::Currency;
use tally_shared::{AppError, AppResult};
use tracing::{debug, info};

/// Decoded snapshot file.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    /// Records to aggregate.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Budget targets.
    #[serde(default)]
    pub budgets: Vec<BudgetTarget>,
    /// Overrides `aggregation.display_currency`.
    #[serde(default)]
    pub display_currency: Option<Currency>,
    /// Overrides `aggregation.fallback_rate`. Quoted as RUB per USD.
    #[serde(default)]
    pub fallback_rate: Option<Decimal>,
    /// Quote in either direction, used as the fallback rate.
    #[serde(default)]
    pub exchange_rate: Option<ExchangeRate>,
}

impl Snapshot {
    /// Reads and decodes the snapshot at `path`.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` if the file does not exist
    /// - `AppError::Validation` if a field holds an unsupported value
    /// - `AppError::Snapshot` for unreadable files and malformed JSON
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("snapshot {}", path.display()))
            }
            _ => AppError::Snapshot(format!("{}: {err}", path.display())),
        })?;

        let snapshot = Self::parse(&raw)?;
        info!(
            path = %path.display(),
            records = snapshot.records.len(),
            budgets = snapshot.budgets.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Decodes a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the JSON is well formed but holds
    /// an unknown currency, kind, or similar, and `AppError::Snapshot`
    /// otherwise.
    pub fn parse(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|err| match err.classify() {
            serde_json::error::Category::Data => AppError::Validation(err.to_string()),
            _ => AppError::Snapshot(err.to_string()),
        })
    }

    /// Builds the aggregation request, filling gaps from `defaults`.
    ///
    /// Precedence for the fallback rate: `fallback_rate`, then
    /// `exchange_rate`, then configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `exchange_rate` is not a usable
    /// quote of the RUB/USD pair.
    pub fn into_request(self, defaults: &AggregationConfig) -> AppResult<AggregationRequest> {
        let display_currency = self.display_currency.unwrap_or(defaults.display_currency);

        let fallback_rate = match (self.fallback_rate, &self.exchange_rate) {
            (Some(rate), _) => rate,
            (None, Some(quote)) => quote
                .pair_rate(CurrencyPair::RUB_PER_USD)
                .map_err(|err| AppError::Validation(format!("exchange_rate: {err}")))?,
            (None, None) => defaults.fallback_rate,
        };

        debug!(
            display_currency = %display_currency,
            fallback_rate = %fallback_rate,
            "Aggregation parameters resolved"
        );

        Ok(AggregationRequest::new(self.records, display_currency, fallback_rate)
            .with_budgets(self.budgets)
            .with_decimal_places(defaults.decimal_places))
    }
}
