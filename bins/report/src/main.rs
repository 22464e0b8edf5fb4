//! Tally report
//!
//! Reads a ledger snapshot and prints a summary as JSON on stdout.
//! Logs go to stderr.

mod args;
mod report;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::aggregate::SummaryCache;
use tally_shared::config::LogConfig;
use tally_shared::{AppConfig, AppError};

use crate::args::Args;
use crate::snapshot::Snapshot;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Prints help or a usage error and exits on its own.
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(&LogConfig::default());
            return fail(&anyhow::Error::from(err));
        }
    };
    init_tracing(&config.log);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

/// Reports `err` and maps it to its exit code. Tracing must be installed.
fn fail(err: &anyhow::Error) -> ExitCode {
    let code = exit_code(err);
    error!(error = %err, code, "Report failed");
    eprintln!("tally-report: {err:#}");
    ExitCode::from(code)
}

/// `AppError` exit code, `70` for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<AppError>()
        .map_or(70, AppError::exit_code);
    u8::try_from(code).unwrap_or(1)
}

fn run(args: &Args, config: &AppConfig) -> anyhow::Result<()> {
    let path = args
        .path
        .clone()
        .or_else(|| config.snapshot.path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            AppError::Validation(
                "no snapshot given; pass SNAPSHOT_PATH or set snapshot.path".to_string(),
            )
        })?;

    let request = Snapshot::load(&path)?.into_request(&config.aggregation)?;

    let cache = config
        .cache
        .enabled
        .then(|| SummaryCache::from_config(&config.cache));
    let output = report::render(args.view, &request, cache.as_ref())?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    info!(view = ?args.view, "Report written");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over `log.level`.
fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
