//! Session state and command handlers
//!
//! A `Session` owns everything a REPL run mutates: the API client (and with
//! it the response cache), the location-listing cursors, the Pokemon caught so
//! far, and the random source used for catch attempts. Handlers write their
//! output to any `io::Write` so they can be driven from tests.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catch::{attempt_catch, CatchOutcome};
use crate::commands::{Command, CommandError, CommandKind};
use crate::data::{LocationPage, PokeApiClient, Pokemon};

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Position in the paginated location-area listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// URL of the page `map` will show next
    pub next: Option<String>,
    /// URL of the page `mapb` will show next
    pub previous: Option<String>,
}

impl PageCursor {
    fn update(&mut self, page: &LocationPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
    }
}

/// Mutable state threaded through every command
pub struct Session {
    client: PokeApiClient,
    cursor: PageCursor,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    /// Creates a session with an entropy-seeded random source.
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a fixed random source (for testing)
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            cursor: PageCursor::default(),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Returns the caught Pokemon with the given name, if any
    pub fn caught(&self, name: &str) -> Option<&Pokemon> {
        self.pokedex.get(name)
    }

    /// Names of every caught Pokemon, sorted
    pub fn caught_names(&self) -> impl Iterator<Item = &str> {
        self.pokedex.keys().map(String::as_str)
    }

    /// Runs a parsed command, writing its output to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Outcome, CommandError> {
        debug!(?command, "executing command");
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Outcome::Exit);
            }
            Command::Map => self.map_next(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(Some(name)) => self.catch(&name, out).await?,
            Command::Catch(None) => self.list_caught(out)?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.pokedex(out)?,
        }
        Ok(Outcome::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for kind in CommandKind::all() {
            writeln!(out, "{}: {}", kind.usage(), kind.description())?;
        }
        Ok(())
    }

    /// Shows the next page, starting over from the first once the last is passed.
    async fn map_next<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let page = self.client.list_locations(self.cursor.next.as_deref()).await?;
        self.cursor.update(&page);
        print_page(&page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let previous = self
            .cursor
            .previous
            .clone()
            .ok_or_else(|| CommandError::Domain("you're on the first page".to_string()))?;

        let page = self.client.list_locations(Some(&previous)).await?;
        self.cursor.update(&page);
        print_page(&page, out)
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), CommandError> {
        let location = self.client.explore_area(area).await?;

        writeln!(out, "Exploring {}...", location.name)?;
        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let name = name.to_lowercase();
        if self.pokedex.contains_key(&name) {
            return Err(CommandError::Domain(format!("{} has already been caught!", name)));
        }

        let pokemon = self.client.pokemon(&name).await?;

        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;
        match attempt_catch(pokemon.base_experience, &mut self.rng) {
            CatchOutcome::Caught => {
                writeln!(out, "{} was caught!", pokemon.name)?;
                info!(pokemon = %pokemon.name, "caught");
                self.pokedex.insert(pokemon.name.clone(), pokemon);
            }
            CatchOutcome::Escaped => {
                writeln!(out, "{} escaped!", pokemon.name)?;
            }
        }
        Ok(())
    }

    fn list_caught<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.pokedex.is_empty() {
            writeln!(out, "No Pokemon caught yet.")?;
            return Ok(());
        }
        writeln!(out, "Caught Pokemon:")?;
        for name in self.caught_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let pokemon = self
            .pokedex
            .get(&name.to_lowercase())
            .ok_or_else(|| CommandError::Domain("you have not caught that pokemon".to_string()))?;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, " - {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for pokemon_type in &pokemon.types {
            writeln!(out, " - {}", pokemon_type.kind.name)?;
        }
        Ok(())
    }

    fn pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Your Pokedex:")?;
        for name in self.caught_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    /// Ends the session, stopping the cache sweeper.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

fn print_page<W: Write>(page: &LocationPage, out: &mut W) -> Result<(), CommandError> {
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    Ok(())
}
