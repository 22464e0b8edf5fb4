//! Report rendering.

use serde_json::Value;
use tally_core::aggregate::{AggregationRequest, EntitySummary, LedgerAggregator, SummaryCache};
use tally_shared::{AppError, AppResult};
use tracing::debug;

use crate::args::View;

/// Computes the requested view and renders it as JSON.
///
/// The dashboard goes through `cache` when one is given.
///
/// # Errors
///
/// Returns `AppError::Validation` if the request is rejected.
pub fn render(
    view: View,
    request: &AggregationRequest,
    cache: Option<&SummaryCache>,
) -> AppResult<Value> {
    let value = match view {
        View::Dashboard => match cache {
            Some(cache) => {
                let result = cache.summarize(request)?;
                debug!(cached = result.cached, "Dashboard summary ready");
                to_value(&*result.summary)?
            }
            None => to_value(&LedgerAggregator::summarize(request)?)?,
        },
        View::ByEntity => {
            let entities: Vec<EntitySummary> = LedgerAggregator::summarize_by_entity(request)?
                .into_iter()
                .map(EntitySummary::from)
                .collect();
            to_value(&entities)?
        }
        View::ByCategory => to_value(&LedgerAggregator::summarize_by_category(request)?)?,
        View::Budgets => to_value(&LedgerAggregator::budget_progress(request)?)?,
    };
    Ok(value)
}

fn to_value<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|err| AppError::Internal(err.to_string()))
}
