//! Command registry for the Pokedex REPL
//!
//! The command set is fixed: `CommandKind` names every command and carries its
//! help text, and `Command` is a parsed invocation with its arguments checked.

use thiserror::Error;

use crate::data::ApiError;

/// Errors reported back to the user after a command fails
#[derive(Debug, Error)]
pub enum CommandError {
    /// Fetching or decoding remote data failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Unknown command or wrong number of arguments
    #[error("{0}")]
    UserInput(String),

    /// The command was well-formed but cannot be carried out in this session
    #[error("{0}")]
    Domain(String),

    /// Writing command output failed
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// The commands understood by the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl CommandKind {
    /// Returns every command in help order.
    pub fn all() -> &'static [CommandKind] {
        &[
            CommandKind::Help,
            CommandKind::Exit,
            CommandKind::Map,
            CommandKind::MapBack,
            CommandKind::Explore,
            CommandKind::Catch,
            CommandKind::Inspect,
            CommandKind::Pokedex,
        ]
    }

    /// The word typed to invoke the command
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Exit => "exit",
            CommandKind::Map => "map",
            CommandKind::MapBack => "mapb",
            CommandKind::Explore => "explore",
            CommandKind::Catch => "catch",
            CommandKind::Inspect => "inspect",
            CommandKind::Pokedex => "pokedex",
        }
    }

    /// Name plus argument placeholders, as shown by `help`
    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::Explore => "explore <location>",
            CommandKind::Catch => "catch <pokemon>",
            CommandKind::Inspect => "inspect <pokemon>",
            _ => self.name(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Help => "Displays a help message",
            CommandKind::Exit => "Exit the Pokedex",
            CommandKind::Map => "Display the next 20 location areas",
            CommandKind::MapBack => "Display the previous 20 location areas",
            CommandKind::Explore => "Display the pokemon in a location",
            CommandKind::Catch => "Attempt to catch a pokemon",
            CommandKind::Inspect => "Provide details on a caught pokemon",
            CommandKind::Pokedex => "Provide the list of caught pokemon",
        }
    }

    /// Looks up a command by its exact (already lowercased) name.
    pub fn from_name(name: &str) -> Option<CommandKind> {
        CommandKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    /// `None` lists the Pokemon caught so far
    Catch(Option<String>),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Builds a command from its name and positional arguments.
    ///
    /// Commands without parameters ignore any arguments given to them.
    ///
    /// # Returns
    /// * `Ok(Command)` if the name is known and the arguments fit
    /// * `Err(CommandError::UserInput)` otherwise
    pub fn parse(name: &str, args: &[String]) -> Result<Command, CommandError> {
        let kind = CommandKind::from_name(name).ok_or_else(|| unknown_command(name))?;

        let command = match kind {
            CommandKind::Help => Command::Help,
            CommandKind::Exit => Command::Exit,
            CommandKind::Map => Command::Map,
            CommandKind::MapBack => Command::MapBack,
            CommandKind::Pokedex => Command::Pokedex,
            CommandKind::Explore => match args {
                [area] => Command::Explore(area.clone()),
                _ => {
                    return Err(CommandError::UserInput(
                        "you must provide a unique location name".to_string(),
                    ))
                }
            },
            CommandKind::Catch => match args {
                [] => Command::Catch(None),
                [pokemon] => Command::Catch(Some(pokemon.clone())),
                _ => {
                    return Err(CommandError::UserInput(
                        "you can only catch one Pokemon at a time".to_string(),
                    ))
                }
            },
            CommandKind::Inspect => match args {
                [pokemon] => Command::Inspect(pokemon.clone()),
                _ => {
                    return Err(CommandError::UserInput(
                        "you must provide a pokemon name".to_string(),
                    ))
                }
            },
        };

        Ok(command)
    }
}

fn unknown_command(name: &str) -> CommandError {
    let candidates = complete(name);
    if name.trim().is_empty() || candidates.is_empty() {
        return CommandError::UserInput(format!("Unknown command: {}", name));
    }
    CommandError::UserInput(format!(
        "Unknown command: {} (did you mean: {}?)",
        name,
        candidates.join(", ")
    ))
}

/// Returns the command names starting with `prefix`, in help order.
pub fn complete(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    CommandKind::all()
        .iter()
        .map(|kind| kind.name())
        .filter(|name| name.starts_with(&prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_every_kind_round_trips_through_its_name() {
        for kind in CommandKind::all() {
            assert_eq!(CommandKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fly", &[]).unwrap_err();
        assert!(matches!(err, CommandError::UserInput(_)));
        assert_eq!(err.to_string(), "Unknown command: fly");
    }

    #[test]
    fn test_parse_unknown_prefix_suggests_completions() {
        let err = Command::parse("ma", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: ma (did you mean: map, mapb?)");

        let err = Command::parse("insp", &args(&["pikachu"])).unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: insp (did you mean: inspect?)");
    }

    #[test]
    fn test_parse_commands_without_arguments() {
        assert_eq!(Command::parse("help", &[]).unwrap(), Command::Help);
        assert_eq!(Command::parse("exit", &[]).unwrap(), Command::Exit);
        assert_eq!(Command::parse("map", &[]).unwrap(), Command::Map);
        assert_eq!(Command::parse("mapb", &[]).unwrap(), Command::MapBack);
        assert_eq!(Command::parse("pokedex", &[]).unwrap(), Command::Pokedex);
    }

    #[test]
    fn test_parse_ignores_extra_arguments_for_plain_commands() {
        assert_eq!(Command::parse("map", &args(&["extra"])).unwrap(), Command::Map);
    }

    #[test]
    fn test_parse_explore_requires_one_argument() {
        assert_eq!(
            Command::parse("explore", &args(&["pastoria-city-area"])).unwrap(),
            Command::Explore("pastoria-city-area".to_string())
        );
        assert!(matches!(
            Command::parse("explore", &[]),
            Err(CommandError::UserInput(_))
        ));
        assert!(matches!(
            Command::parse("explore", &args(&["a", "b"])),
            Err(CommandError::UserInput(_))
        ));
    }

    #[test]
    fn test_parse_catch_takes_zero_or_one_argument() {
        assert_eq!(Command::parse("catch", &[]).unwrap(), Command::Catch(None));
        assert_eq!(
            Command::parse("catch", &args(&["pikachu"])).unwrap(),
            Command::Catch(Some("pikachu".to_string()))
        );
        let err = Command::parse("catch", &args(&["pikachu", "eevee"])).unwrap_err();
        assert!(err.to_string().contains("one Pokemon at a time"));
    }

    #[test]
    fn test_parse_inspect_requires_one_argument() {
        assert_eq!(
            Command::parse("inspect", &args(&["pikachu"])).unwrap(),
            Command::Inspect("pikachu".to_string())
        );
        assert!(Command::parse("inspect", &[]).is_err());
    }

    #[test]
    fn test_usage_includes_placeholders() {
        assert_eq!(CommandKind::Explore.usage(), "explore <location>");
        assert_eq!(CommandKind::Map.usage(), "map");
    }

    #[test]
    fn test_complete_matches_prefix() {
        assert_eq!(complete("ma"), vec!["map", "mapb"]);
        assert_eq!(complete("E"), vec!["exit", "explore"]);
        assert!(complete("z").is_empty());
        assert_eq!(complete("").len(), CommandKind::all().len());
    }
}
