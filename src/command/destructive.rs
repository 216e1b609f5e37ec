//! Destructive commands: delete and clear.
//!
//! Both validate and prompt on `execute`, and only touch the model once
//! confirmed. See [`Confirmation`] for the state machine.

use crate::model::{Model, Record};

use super::{CommandError, CommandResult, Confirmation, Index, Result, resolve};

/// Deletes the record at `index` of the filtered view, after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    pub index: Index,
    confirmation: Confirmation<Record>,
}

impl DeleteCommand {
    pub const USAGE: &'static str = "delete: Deletes the student at INDEX in the displayed list, \
        after a Y/N confirmation.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: delete 1";

    pub fn new(index: Index) -> Self {
        Self {
            index,
            confirmation: Confirmation::Unconfirmed,
        }
    }

    #[cfg(test)]
    pub fn confirmation(&self) -> &Confirmation<Record> {
        &self.confirmation
    }

    /// Resolves the target and asks for confirmation. The model is not modified.
    pub fn execute(&mut self, model: &Model) -> Result<CommandResult> {
        if self.confirmation != Confirmation::Unconfirmed {
            return Err(CommandError::ContractViolation(format!(
                "delete executed twice; it is {}",
                self.confirmation.state_name()
            )));
        }
        let target = resolve(model, self.index)?.clone();
        let prompt = format!("Delete {}? [Y/N]", target.label());
        self.confirmation.prompt(target)?;
        Ok(CommandResult::prompt(prompt))
    }

    /// Removes the prompted target, provided it is still in the model.
    pub fn execute_confirmed(&mut self, model: &mut Model) -> Result<CommandResult> {
        let target = self.confirmation.confirm()?;
        if let Err(e) = model.remove_record(&target) {
            self.confirmation.abandon();
            return Err(e.into());
        }
        Ok(CommandResult::message(format!(
            "Deleted student: {}",
            target.label()
        )))
    }

    pub fn execute_cancelled(&mut self) -> Result<CommandResult> {
        let label = self
            .confirmation
            .target()
            .map(Record::label)
            .unwrap_or_default();
        self.confirmation.cancel()?;
        Ok(CommandResult::message(format!(
            "Deletion of {label} cancelled."
        )))
    }
}

/// Removes every record, after confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearCommand {
    confirmation: Confirmation<()>,
}

impl ClearCommand {
    pub const USAGE: &'static str = "clear: Deletes all students, after a Y/N confirmation.";

    pub fn execute(&mut self, model: &Model) -> Result<CommandResult> {
        if self.confirmation != Confirmation::Unconfirmed {
            return Err(CommandError::ContractViolation(format!(
                "clear executed twice; it is {}",
                self.confirmation.state_name()
            )));
        }
        self.confirmation.prompt(())?;
        Ok(CommandResult::prompt(format!(
            "Clear all {} students? [Y/N]",
            model.records().len()
        )))
    }

    pub fn execute_confirmed(&mut self, model: &mut Model) -> Result<CommandResult> {
        self.confirmation.confirm()?;
        model.clear_records();
        Ok(CommandResult::message("All students have been cleared."))
    }

    pub fn execute_cancelled(&mut self) -> Result<CommandResult> {
        self.confirmation.cancel()?;
        Ok(CommandResult::message("Clear cancelled."))
    }
}
