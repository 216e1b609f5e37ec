//! Commands: typed instructions produced by the parser and run against the model.
//!
//! [`Command`] is a closed set. Every variant supports [`Command::execute`];
//! destructive ones (`delete`, `clear`) stop after prompting and finish through
//! [`Command::execute_confirmed`] or [`Command::execute_cancelled`].

mod confirmation;
mod destructive;
mod edit;
mod schedule;
mod view;

use std::num::NonZeroUsize;

use crate::model::{Model, ModelError, Record};

pub use confirmation::Confirmation;
pub use destructive::{ClearCommand, DeleteCommand};
pub use edit::{AddCommand, EditCommand, EditDescriptor, RemarkCommand};
pub use schedule::{ScheduleCommand, UnscheduleCommand};
pub use view::{FindCommand, OpenCommand, SortCommand, ViewCommand};

/// A 1-based position in the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(NonZeroUsize);

impl Index {
    pub fn from_one_based(index: NonZeroUsize) -> Self {
        Self(index)
    }

    pub fn one_based(self) -> usize {
        self.0.get()
    }

    pub fn zero_based(self) -> usize {
        self.0.get() - 1
    }
}

/// Errors raised while executing a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("The student index {index} is invalid: {size} student(s) are listed")]
    InvalidIndex { index: usize, size: usize },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("{0} has no GitHub profile or repository to open")]
    NoLink(String),

    /// The confirmation protocol was driven out of order. A bug, not a user error.
    #[error("internal error: {0}")]
    ContractViolation(String),
}

pub type Result<T> = core::result::Result<T, CommandError>;

/// What a command reports back to whoever renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Text for the user.
    pub feedback: String,

    /// The renderer must ask yes/no and route the answer back.
    pub requires_confirmation: bool,

    /// The renderer should show the help text.
    pub show_help: bool,

    /// The renderer should shut down.
    pub exit: bool,

    /// A URL the renderer should open.
    pub link: Option<String>,

    /// The filtered view may have changed; the renderer should show it again.
    pub show_list: bool,

    /// False when `feedback` describes a failure.
    pub success: bool,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            success: true,
            ..Self::default()
        }
    }

    pub fn prompt(feedback: impl Into<String>) -> Self {
        Self {
            requires_confirmation: true,
            ..Self::message(feedback)
        }
    }

    pub fn failure(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Self::default()
        }
    }
}

/// Every command TAHub understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Edit(EditCommand),
    Remark(RemarkCommand),
    Delete(DeleteCommand),
    Clear(ClearCommand),
    List,
    Find(FindCommand),
    Sort(SortCommand),
    View(ViewCommand),
    Open(OpenCommand),
    Schedule(ScheduleCommand),
    Unschedule(UnscheduleCommand),
    Schedules,
    Help,
    Exit,
}

pub const LIST_USAGE: &str = "list: Lists all students.";
pub const SCHEDULES_USAGE: &str = "schedules: Lists all scheduled events.";
pub const HELP_USAGE: &str = "help: Shows the command summary.";
pub const EXIT_USAGE: &str = "exit: Saves and exits.";

/// One usage line per command, in the order `help` shows them.
pub fn help_text() -> String {
    [
        AddCommand::USAGE,
        EditCommand::USAGE,
        RemarkCommand::USAGE,
        DeleteCommand::USAGE,
        ClearCommand::USAGE,
        LIST_USAGE,
        FindCommand::USAGE,
        SortCommand::USAGE,
        ViewCommand::USAGE,
        OpenCommand::USAGE,
        ScheduleCommand::USAGE,
        UnscheduleCommand::USAGE,
        SCHEDULES_USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n\n")
}

impl Command {
    /// Runs the command. Destructive commands only validate and prompt here.
    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult> {
        let mut result = match self {
            Self::Add(c) => c.execute(model),
            Self::Edit(c) => c.execute(model),
            Self::Remark(c) => c.execute(model),
            Self::Delete(c) => c.execute(model),
            Self::Clear(c) => c.execute(model),
            Self::List => {
                model.set_filter(crate::model::RecordFilter::All);
                Ok(CommandResult::message("Listed all students"))
            }
            Self::Find(c) => Ok(c.execute(model)),
            Self::Sort(c) => Ok(c.execute(model)),
            Self::View(c) => c.execute(model),
            Self::Open(c) => c.execute(model),
            Self::Schedule(c) => c.execute(model),
            Self::Unschedule(c) => c.execute(model),
            Self::Schedules => Ok(schedule::list(model)),
            Self::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::message(help_text())
            }),
            Self::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::message("Goodbye!")
            }),
        }?;
        result.show_list = self.changes_view() && !result.requires_confirmation;
        Ok(result)
    }

    /// Carries out a prompted destructive command.
    pub fn execute_confirmed(&mut self, model: &mut Model) -> Result<CommandResult> {
        let result = match self {
            Self::Delete(c) => c.execute_confirmed(model),
            Self::Clear(c) => c.execute_confirmed(model),
            _ => Err(self.not_destructive()),
        }?;
        Ok(CommandResult {
            show_list: true,
            ..result
        })
    }

    /// Abandons a prompted destructive command.
    pub fn execute_cancelled(&mut self) -> Result<CommandResult> {
        match self {
            Self::Delete(c) => c.execute_cancelled(),
            Self::Clear(c) => c.execute_cancelled(),
            _ => Err(self.not_destructive()),
        }
    }

    /// Keyword this command was parsed from.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit(_) => "edit",
            Self::Remark(_) => "remark",
            Self::Delete(_) => "delete",
            Self::Clear(_) => "clear",
            Self::List => "list",
            Self::Find(_) => "find",
            Self::Sort(_) => "sort",
            Self::View(_) => "view",
            Self::Open(_) => "open",
            Self::Schedule(_) => "schedule",
            Self::Unschedule(_) => "unschedule",
            Self::Schedules => "schedules",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Whether a successful run can add, remove, reorder or hide listed records.
    fn changes_view(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::Edit(_)
                | Self::Remark(_)
                | Self::Delete(_)
                | Self::Clear(_)
                | Self::List
                | Self::Find(_)
                | Self::Sort(_)
        )
    }

    fn not_destructive(&self) -> CommandError {
        CommandError::ContractViolation(format!(
            "`{}` does not take a confirmation",
            self.keyword()
        ))
    }
}

/// Resolves `index` against the filtered view.
fn resolve(model: &Model, index: Index) -> Result<&Record> {
    model
        .filtered_get(index.zero_based())
        .ok_or(CommandError::InvalidIndex {
            index: index.one_based(),
            size: model.filtered_len(),
        })
}
