//! Diagnostic logging setup
//!
//! Logs go to stderr so they never interleave with REPL output on stdout.
//! `RUST_LOG` takes precedence over the configured default level.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber with `level` as the default filter.
///
/// Returns an error if a global subscriber is already installed.
pub fn init(level: LevelFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}
