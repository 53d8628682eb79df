//! Tracing subscriber setup for the `ecospace` binary

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `--verbose` say otherwise
#[must_use]
pub fn effective_level(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose { "debug" } else { config.level.as_str() }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON output.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = effective_level(config, verbose);
    let filter = if verbose {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
