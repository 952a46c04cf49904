// Logging module - Logging infrastructure
use crate::domain::error::{TaskError, TaskResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the log filter. `RUST_LOG` wins; otherwise `verbose` forces debug
/// output for this crate and `level` applies to everything.
pub fn build_filter(level: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(format!("{},elos_task=debug", level))
        } else {
            EnvFilter::new(level)
        }
    })
}

/// Initialize logging system
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(level: &str, verbose: bool) -> TaskResult<()> {
    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbose)
                .with_level(true)
                .with_file(verbose)
                .with_line_number(verbose),
        )
        .try_init()
        .map_err(|e| TaskError::Logging(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!("Logging initialized");
    Ok(())
}
