//! Read-side commands: find, sort, view, open.

use crate::model::{Model, RecordFilter, SortKey};

use super::{CommandError, CommandResult, Index, Result, resolve};

/// Narrows the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    pub filter: RecordFilter,
}

impl FindCommand {
    pub const USAGE: &'static str = "find: Lists students whose names contain any of the \
        keywords (case-insensitive), optionally narrowed by class, team and tags.\n\
        Parameters: [KEYWORD]... [c/CLASS] [pt/PROJECT_TEAM] [t/TAG]...\n\
        Example: find alex david c/T01";

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        model.set_filter(self.filter.clone());
        CommandResult::message(match model.filtered_len() {
            1 => "1 student listed!".to_string(),
            n => format!("{n} students listed!"),
        })
    }
}

/// Reorders the underlying records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCommand {
    pub key: SortKey,
}

impl SortCommand {
    pub const USAGE: &'static str = "sort: Sorts students.\n\
        Parameters: name|id|class|progress\n\
        Example: sort progress";

    pub fn execute(&self, model: &mut Model) -> CommandResult {
        model.sort_records(self.key);
        CommandResult::message(format!("Sorted students by {}", self.key.label()))
    }
}

/// Shows every field of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCommand {
    pub index: Index,
}

impl ViewCommand {
    pub const USAGE: &'static str = "view: Shows the details of the student at INDEX.\n\
        Parameters: INDEX\n\
        Example: view 2";

    pub fn execute(&self, model: &Model) -> Result<CommandResult> {
        let record = resolve(model, self.index)?;
        Ok(CommandResult::message(record.details()))
    }
}

/// Opens a record's repository, or GitHub profile, in the browser.
///
/// The command only resolves the URL; opening it is left to whoever renders the
/// result, so a browser failure can never affect the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCommand {
    pub index: Index,
}

impl OpenCommand {
    pub const USAGE: &'static str = "open: Opens the repository (or GitHub profile) of the \
        student at INDEX in the browser.\n\
        Parameters: INDEX\n\
        Example: open 1";

    pub fn execute(&self, model: &Model) -> Result<CommandResult> {
        let record = resolve(model, self.index)?;
        let url = record
            .link()
            .ok_or_else(|| CommandError::NoLink(record.label()))?;
        Ok(CommandResult {
            link: Some(url.clone()),
            ..CommandResult::message(format!("Opening {url}"))
        })
    }
}
