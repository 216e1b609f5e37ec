//! Command parsing: one raw line in, one typed [`Command`] out.
//!
//! ```text
//! <keyword> [preamble] [<prefix><value>]...
//! ```
//!
//! The keyword picks a command parser. Each command parser tokenizes the rest
//! of the line with the prefixes it recognizes, checks required and duplicated
//! prefixes, and hands each value to a field parser. Defaults for omitted
//! optional fields come from the injected [`Defaults`] table.

mod field;
mod query;
mod record;
mod schedule;
mod tokenizer;

use crate::command::{self, Command};
use crate::config::Defaults;

pub use field::{parse_class, parse_github, parse_progress, parse_project_team, parse_repository};
pub use tokenizer::{ArgumentMultimap, Prefix, tokenize};

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_STUDENT_ID: Prefix = Prefix::new("s/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_CLASS: Prefix = Prefix::new("c/");
pub const PREFIX_GITHUB: Prefix = Prefix::new("g/");
pub const PREFIX_TEAM: Prefix = Prefix::new("pt/");
pub const PREFIX_REPOSITORY: Prefix = Prefix::new("r/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_PROGRESS: Prefix = Prefix::new("pg/");
pub const PREFIX_REMARK: Prefix = Prefix::new("m/");
pub const PREFIX_TIME: Prefix = Prefix::new("d/");

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command: {0}. Type `help` to see every command.")]
    UnknownCommand(String),

    #[error("Invalid command format! {message}\n{usage}")]
    Usage {
        message: String,
        usage: &'static str,
    },

    #[error("Invalid value for {prefix}: {message}")]
    FieldValidation { prefix: Prefix, message: String },

    #[error("The student index provided is invalid: {0:?} is not a positive integer")]
    InvalidIndex(String),
}

impl ParseError {
    pub(crate) fn usage(message: impl Into<String>, usage: &'static str) -> Self {
        Self::Usage {
            message: message.into(),
            usage,
        }
    }
}

pub type Result<T> = core::result::Result<T, ParseError>;

/// Parses one line of user input.
pub fn parse_command(input: &str, defaults: &Defaults) -> Result<Command> {
    let input = input.trim();
    let (keyword, args) = match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], &input[at..]),
        None => (input, ""),
    };

    match keyword {
        "" => Err(ParseError::usage("No command given.", command::HELP_USAGE)),
        "add" => record::parse_add(args, defaults),
        "edit" => record::parse_edit(args, defaults),
        "remark" => record::parse_remark(args),
        "delete" => query::parse_delete(args),
        "clear" => no_arguments(
            args,
            Command::Clear(command::ClearCommand::default()),
            command::ClearCommand::USAGE,
        ),
        "list" => no_arguments(args, Command::List, command::LIST_USAGE),
        "find" => query::parse_find(args),
        "sort" => query::parse_sort(args),
        "view" => query::parse_view(args),
        "open" => query::parse_open(args),
        "schedule" => schedule::parse_schedule(args),
        "unschedule" => schedule::parse_unschedule(args),
        "schedules" => no_arguments(args, Command::Schedules, command::SCHEDULES_USAGE),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Commands that take nothing after the keyword.
fn no_arguments(args: &str, command: Command, usage: &'static str) -> Result<Command> {
    if args.trim().is_empty() {
        Ok(command)
    } else {
        Err(ParseError::usage(
            format!("`{}` takes no arguments.", command.keyword()),
            usage,
        ))
    }
}
