//! Command-line interface parsing for the Pokedex CLI
//!
//! Every option can also be set through an environment variable. Parsed
//! arguments are validated into a `StartupConfig` before anything starts.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::data::DEFAULT_BASE_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// A duration option was zero
    #[error("--{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The log level is not one of off, error, warn, info, debug, trace
    #[error("Invalid log level: '{0}'. Valid levels: off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex CLI - explore PokeAPI location areas and catch Pokemon
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "An interactive Pokedex backed by PokeAPI")]
#[command(version)]
pub struct Cli {
    /// Root URL of the PokeAPI service
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "POKEDEX_TIMEOUT", value_name = "SECS", default_value_t = 5)]
    pub timeout: u64,

    /// How long responses stay cached, in seconds; also the sweep period
    #[arg(long, env = "POKEDEX_CACHE_INTERVAL", value_name = "SECS", default_value_t = 600)]
    pub cache_interval: u64,

    /// Default log level (RUST_LOG overrides it)
    #[arg(long, env = "POKEDEX_LOG", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Validated configuration for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub cache_interval: Duration,
    pub log_level: LevelFilter,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            cache_interval: Duration::from_secs(600),
            log_level: LevelFilter::WARN,
        }
    }
}

/// Parses a log level name, case-insensitively.
pub fn parse_log_level(s: &str) -> Result<LevelFilter, CliError> {
    s.trim()
        .parse::<LevelFilter>()
        .map_err(|_| CliError::InvalidLogLevel(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` if every option is usable
    /// * `Err(CliError)` for a zero duration, unknown log level or non-http URL
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.timeout == 0 {
            return Err(CliError::ZeroDuration("timeout"));
        }
        if cli.cache_interval == 0 {
            return Err(CliError::ZeroDuration("cache-interval"));
        }
        if !(cli.base_url.starts_with("http://") || cli.base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            base_url: cli.base_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
            cache_interval: Duration::from_secs(cli.cache_interval),
            log_level: parse_log_level(&cli.log_level)?,
        })
    }
}
