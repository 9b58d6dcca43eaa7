//! Pokedex CLI - explore PokeAPI location areas and catch Pokemon
//!
//! Starts the cache and API client from the command-line configuration, then
//! hands stdin and stdout to the REPL until the user exits.

use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tracing::{error, info};

use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::data::PokeApiClient;
use pokedex::session::Session;
use pokedex::{logging, repl};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    logging::init(config.log_level).map_err(|e| -> Box<dyn std::error::Error> { e })?;
    info!(
        base_url = %config.base_url,
        timeout = ?config.timeout,
        cache_interval = ?config.cache_interval,
        "starting pokedex"
    );

    let cache = Cache::new(config.cache_interval)?;
    let client = PokeApiClient::new(&config.base_url, config.timeout, cache)?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let result = repl::run(&mut session, stdin, &mut stdout, repl::interrupted()).await;

    session.close().await;
    let status = match result.and_then(|()| stdout.flush()) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "terminal I/O failed");
            eprintln!("Error: {}", e);
            1
        }
    };

    // The blocking stdin reader cannot be cancelled and would hold up runtime
    // shutdown, so every exit path leaves through here
    std::process::exit(status)
}
