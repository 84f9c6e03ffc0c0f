//! Text command language shared by both front ends.
//!
//! A line starting with `:` is a command; any other non-empty line is a
//! move in the current variant's grammar.

use derive_more::{Display, Error};
use polyboard_core::VariantRegistry;
use tracing::instrument;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Move text, passed to the session unchanged.
    Move(String),
    /// A `:` command.
    Command(UserCommand),
}

/// Commands understood by both front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Restart the current variant.
    NewGame,
    /// Ask for a suggestion.
    Hint,
    /// Let the computer move for the side to move.
    Go,
    /// Switch to another variant.
    Variant(VariantChoice),
    /// Set the search depth bound.
    Depth(u32),
    /// Set the search time bound in seconds.
    Time(u32),
    /// List the variants.
    ListVariants,
    /// Show the command summary.
    Help,
    /// Clear the log pane.
    Clear,
    /// Leave the program.
    Quit,
}

/// A variant named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantChoice {
    /// Catalog index.
    Index(usize),
    /// Variant name, matched ignoring case.
    Name(String),
}

impl VariantChoice {
    /// Catalog index this choice refers to, if any.
    pub fn resolve(&self, registry: &VariantRegistry) -> Option<usize> {
        match self {
            Self::Index(index) => (*index < registry.count()).then_some(*index),
            Self::Name(name) => registry.find(name),
        }
    }
}

impl std::fmt::Display for VariantChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A `:` line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// No command has this name.
    #[display("Unknown command ':{}'. Type :help for a list.", name)]
    Unknown {
        /// Name as typed.
        name: String,
    },
    /// The command needs an argument.
    #[display(":{} needs {}.", command, what)]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// Description of the argument.
        what: &'static str,
    },
    /// The argument should have been a whole number.
    #[display(":{} expects a whole number, got '{}'.", command, value)]
    NotANumber {
        /// Command name.
        command: &'static str,
        /// Argument as typed.
        value: String,
    },
    /// The command takes no argument.
    #[display(":{} takes no arguments.", command)]
    UnexpectedArgument {
        /// Command name.
        command: &'static str,
    },
}

/// Lines shown by `:help`.
pub const HELP_LINES: [&str; 11] = [
    "Type a move such as B2, A7B6, C or pass, or one of these commands:",
    "  :new              start the current game over",
    "  :hint             suggest a move for the side to move",
    "  :go               let the computer move",
    "  :variant <n|name> switch to another game",
    "  :variants         list the games",
    "  :depth <n>        set the search depth",
    "  :time <secs>      set the search time",
    "  :clear            clear the log",
    "  :help             show this summary",
    "  :quit             leave",
];

impl Input {
    /// Parses one line; blank lines yield `None`.
    #[instrument]
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        match line.strip_prefix(':') {
            Some(command) => parse_command(command).map(|c| Some(Self::Command(c))),
            None => Ok(Some(Self::Move(line.to_string()))),
        }
    }
}

fn parse_command(text: &str) -> Result<UserCommand, CommandError> {
    let mut words = text.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let argument = words.collect::<Vec<_>>().join(" ");

    let bare = |command: &'static str, parsed: UserCommand| {
        if argument.is_empty() {
            Ok(parsed)
        } else {
            Err(CommandError::UnexpectedArgument { command })
        }
    };
    let number = |command: &'static str| {
        if argument.is_empty() {
            return Err(CommandError::MissingArgument {
                command,
                what: "a number",
            });
        }
        argument.parse::<u32>().map_err(|_| CommandError::NotANumber {
            command,
            value: argument.clone(),
        })
    };

    match name.as_str() {
        "new" | "reset" => bare("new", UserCommand::NewGame),
        "hint" => bare("hint", UserCommand::Hint),
        "go" => bare("go", UserCommand::Go),
        "variants" => bare("variants", UserCommand::ListVariants),
        "help" | "?" => bare("help", UserCommand::Help),
        "clear" => bare("clear", UserCommand::Clear),
        "quit" | "q" | "exit" => bare("quit", UserCommand::Quit),
        "depth" => number("depth").map(UserCommand::Depth),
        "time" => number("time").map(UserCommand::Time),
        "variant" => {
            if argument.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "variant",
                    what: "a variant number or name",
                });
            }
            let choice = match argument.parse::<usize>() {
                Ok(index) => VariantChoice::Index(index),
                Err(_) => VariantChoice::Name(argument.clone()),
            };
            Ok(UserCommand::Variant(choice))
        }
        _ => Err(CommandError::Unknown { name: name.clone() }),
    }
}
