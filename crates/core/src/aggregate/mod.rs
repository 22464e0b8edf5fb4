//! Ledger aggregation into display-currency summaries.
//!
//! Dashboard, per-entity, and per-category views are all reductions of the
//! same converted contributions, so they always agree with each other.

pub mod aggregator;
pub mod cache;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::{LedgerAggregator, MAX_DECIMAL_PLACES};
pub use cache::{CachedSummary, SummaryCache};
pub use types::{AggregationRequest, CategoryTotal, EntitySummary, LedgerSummary, Period};
