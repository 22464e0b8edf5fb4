//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Aggregation defaults.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Summary cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Snapshot input configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Aggregation defaults applied when a snapshot does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Currency all summaries are expressed in.
    #[serde(default = "default_display_currency")]
    pub display_currency: Currency,
    /// Pair rate used when a record carries no override (RUB per USD).
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: Decimal,
    /// Decimal places of the final summary figures.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_display_currency() -> Currency {
    Currency::Rub
}

fn default_fallback_rate() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_decimal_places() -> u32 {
    2
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            display_currency: default_display_currency(),
            fallback_rate: default_fallback_rate(),
            decimal_places: default_decimal_places(),
        }
    }
}

/// Summary cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether summaries are memoised at all.
    #[serde(default)]
    pub enabled: bool,
    /// Maximum number of cached summaries.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a cached summary in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "tally=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Snapshot input configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotConfig {
    /// Default snapshot path when none is given on the command line.
    #[serde(default)]
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        tracing::debug!(
            run_mode = %run_mode,
            display_currency = %config.aggregation.display_currency,
            fallback_rate = %config.aggregation.fallback_rate,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for a non-positive fallback rate or an
    /// out-of-range precision.
    pub fn validate(&self) -> AppResult<()> {
        if self.aggregation.fallback_rate <= Decimal::ZERO {
            return Err(AppError::Config(format!(
                "aggregation.fallback_rate must be positive, got {}",
                self.aggregation.fallback_rate
            )));
        }
        if self.aggregation.decimal_places > 8 {
            return Err(AppError::Config(format!(
                "aggregation.decimal_places must be at most 8, got {}",
                self.aggregation.decimal_places
            )));
        }
        Ok(())
    }
}
