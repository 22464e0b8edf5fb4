//! Summary caching using Moka.
//!
//! Snapshots are immutable, so a summary computed once for a request can be
//! served again until it expires. Rejected requests are never cached.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tally_shared::config::CacheConfig;
use tracing::trace;

use super::aggregator::LedgerAggregator;
use super::types::{AggregationRequest, LedgerSummary};
use crate::ledger::InvalidInputError;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// A summary and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct CachedSummary {
    /// The summary.
    pub summary: Arc<LedgerSummary>,
    /// True when no computation happened.
    pub cached: bool,
}

/// Cache of dashboard summaries keyed by request contents.
#[derive(Clone)]
pub struct SummaryCache {
    cache: Cache<u64, Arc<LedgerSummary>>,
}

impl SummaryCache {
    /// Creates a cache with default settings: 256 entries, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache holding at most `max_capacity` summaries for
    /// `ttl_secs` seconds each.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Creates a cache from the `cache` configuration section.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Hash identifying a request's contents.
    #[must_use]
    pub fn snapshot_key(request: &AggregationRequest) -> u64 {
        let mut hasher = DefaultHasher::new();
        request.hash(&mut hasher);
        hasher.finish()
    }

    /// Summarises `request`, reusing a cached summary when one exists.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError` if the request is invalid.
    pub fn summarize(&self, request: &AggregationRequest) -> Result<CachedSummary, InvalidInputError> {
        let key = Self::snapshot_key(request);

        if let Some(summary) = self.cache.get(&key) {
            trace!(key, "Summary cache hit");
            return Ok(CachedSummary {
                summary,
                cached: true,
            });
        }

        trace!(key, "Summary cache miss");
        let summary = Arc::new(LedgerAggregator::summarize(request)?);
        self.cache.insert(key, Arc::clone(&summary));

        Ok(CachedSummary {
            summary,
            cached: false,
        })
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending maintenance so counts and invalidations are visible.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new()
    }
}
