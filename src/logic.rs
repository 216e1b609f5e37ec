//! The dispatcher between the text surface and the model.
//!
//! [`Logic`] owns the model and the one piece of state that spans two inputs:
//! a destructive command waiting for its yes/no answer. Every line goes
//! through [`Logic::handle`], which either answers the pending prompt or
//! parses and runs a new command. Errors never escape; they come back as
//! failed [`CommandResult`]s.

use crate::browser::Browser;
use crate::command::{self, Command, CommandError, CommandResult};
use crate::config::Defaults;
use crate::model::Model;
use crate::parser;
use crate::storage::{Snapshot, Storage};

/// A prompted command and the prompt it showed.
struct Pending {
    command: Command,
    prompt: String,
}

/// Owns the model and routes input to commands.
pub struct Logic {
    model: Model,
    defaults: Defaults,
    storage: Storage,
    browser: Box<dyn Browser>,
    pending: Option<Pending>,
}

impl Logic {
    pub fn new(
        model: Model,
        defaults: Defaults,
        storage: Storage,
        browser: Box<dyn Browser>,
    ) -> Self {
        Self {
            model,
            defaults,
            storage,
            browser,
            pending: None,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Whether the next line will be read as a yes/no answer.
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    /// Handles one line of input.
    pub fn handle(&mut self, line: &str) -> CommandResult {
        if let Some(pending) = &self.pending {
            let reprompt = format!("Please answer y or n.\n{}", pending.prompt);
            return match line.trim().to_lowercase().as_str() {
                "y" | "yes" => self.confirm(),
                "n" | "no" => self.cancel(),
                _ => CommandResult {
                    success: false,
                    ..CommandResult::prompt(reprompt)
                },
            };
        }

        let mut command = match parser::parse_command(line, &self.defaults) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(error = %e, "parse failed");
                return CommandResult::failure(e.to_string());
            }
        };
        tracing::debug!(command = command.keyword(), "executing");

        match command.execute(&mut self.model) {
            Ok(result) if result.requires_confirmation => {
                self.pending = Some(Pending {
                    command,
                    prompt: result.feedback.clone(),
                });
                result
            }
            outcome => self.finish(outcome),
        }
    }

    /// Applies the pending destructive command.
    pub fn confirm(&mut self) -> CommandResult {
        let Some(mut pending) = self.pending.take() else {
            return CommandResult::failure("Nothing is waiting for confirmation.");
        };
        tracing::info!(command = pending.command.keyword(), "confirmed");
        let outcome = pending.command.execute_confirmed(&mut self.model);
        self.finish(outcome)
    }

    /// Abandons the pending destructive command.
    pub fn cancel(&mut self) -> CommandResult {
        let Some(mut pending) = self.pending.take() else {
            return CommandResult::failure("Nothing is waiting for confirmation.");
        };
        tracing::info!(command = pending.command.keyword(), "cancelled");
        let outcome = pending.command.execute_cancelled();
        self.finish(outcome)
    }

    /// Turns errors into feedback, opens links, and saves after success.
    fn finish(&mut self, outcome: command::Result<CommandResult>) -> CommandResult {
        let mut result = match outcome {
            Ok(result) => result,
            Err(CommandError::ContractViolation(message)) => {
                tracing::error!(%message, "confirmation protocol violated");
                return CommandResult::failure(format!("Internal error: {message}"));
            }
            Err(e) => return CommandResult::failure(e.to_string()),
        };

        if let Some(url) = result.link.clone() {
            if let Err(e) = self.browser.open(&url) {
                tracing::warn!(%url, error = %e, "could not open link");
                result.feedback.push_str(&format!("\nCould not open {url}: {e}"));
            }
        }

        if let Err(e) = self.storage.save(&Snapshot::of(&self.model)) {
            let path = self.storage.path().display();
            tracing::warn!(%path, error = %e, "save failed");
            result
                .feedback
                .push_str(&format!("\nCould not save data to {path}: {e}"));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::TempDir;

    use crate::browser::BrowserError;
    use crate::model::Github;
    use crate::model::fixtures::*;

    /// Records every URL it is asked to open; optionally fails.
    #[derive(Clone, Default)]
    struct RecordingBrowser {
        opened: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Browser for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), BrowserError> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(BrowserError::InvalidUrl(url.to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn logic_with(dir: &TempDir, browser: RecordingBrowser) -> Logic {
        let model = Model::new(vec![alex(), bernice(), charlotte()], Vec::new()).unwrap();
        Logic::new(
            model,
            Defaults::default(),
            Storage::new(dir.path().join("data.json")),
            Box::new(browser),
        )
    }

    fn logic(dir: &TempDir) -> Logic {
        logic_with(dir, RecordingBrowser::default())
    }

    fn saved(dir: &TempDir) -> Snapshot {
        Storage::new(dir.path().join("data.json"))
            .load()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn delete_asks_then_removes() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let prompt = logic.handle("delete 2");
        assert!(prompt.requires_confirmation);
        assert_eq!(prompt.feedback, "Delete Bernice Yu (A0000002C)? [Y/N]");
        assert_eq!(logic.model().records().len(), 3);
        assert!(logic.is_awaiting_confirmation());

        let done = logic.handle("Y");
        assert!(done.success);
        assert_eq!(done.feedback, "Deleted student: Bernice Yu (A0000002C)");
        assert!(!logic.is_awaiting_confirmation());
        assert_eq!(saved(&dir).records, vec![alex(), charlotte()]);
    }

    #[test]
    fn delete_cancelled_keeps_everything() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        logic.handle("delete 1");
        let cancelled = logic.handle("no");

        assert!(cancelled.success);
        assert!(!logic.is_awaiting_confirmation());
        assert_eq!(logic.model().records().len(), 3);
    }

    #[test]
    fn other_answers_re_ask() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);
        logic.handle("delete 1");

        let again = logic.handle("list");

        assert!(again.requires_confirmation);
        assert!(!again.success);
        assert!(again.feedback.ends_with("Delete Alex Yeoh (A0000001B)? [Y/N]"));
        assert!(logic.is_awaiting_confirmation());
        assert_eq!(logic.model().records().len(), 3);
    }

    #[test]
    fn prompt_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        logic.handle("delete 1");

        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn delete_on_filtered_view() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        assert_eq!(logic.handle("find charlotte").feedback, "1 student listed!");
        logic.handle("delete 1");
        logic.handle("y");

        assert_eq!(logic.model().records(), &[alex(), bernice()]);
    }

    #[test]
    fn invalid_index_does_not_prompt() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let result = logic.handle("delete 9");

        assert!(!result.success);
        assert!(!result.requires_confirmation);
        assert!(!logic.is_awaiting_confirmation());
    }

    #[test]
    fn confirm_without_prompt_fails() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        assert!(!logic.confirm().success);
        assert!(!logic.cancel().success);
        assert!(matches!(
            logic.handle("y"),
            CommandResult { success: false, .. }
        ));
    }

    #[test]
    fn parse_errors_become_feedback() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let result = logic.handle("add n/Bob");

        assert!(!result.success);
        assert!(result.feedback.contains("add"));
    }

    #[test]
    fn duplicate_add_reports_and_keeps_store() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let result = logic.handle("add n/Dan s/A0000001B");

        assert!(!result.success);
        assert_eq!(logic.model().records().len(), 3);
    }

    #[test]
    fn successful_commands_save() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        let result = logic.handle("add n/Dan Tan s/A0000009Z c/T03");

        assert!(result.success, "{}", result.feedback);
        assert_eq!(saved(&dir).records.len(), 4);
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let model = Model::new(vec![alex()], Vec::new()).unwrap();
        // A directory cannot be written as a file.
        let mut logic = Logic::new(
            model,
            Defaults::default(),
            Storage::new(dir.path()),
            Box::new(RecordingBrowser::default()),
        );

        let result = logic.handle("list");

        assert!(result.success);
        assert!(result.feedback.contains("Could not save data"));
    }

    #[test]
    fn open_hands_link_to_browser() {
        let dir = TempDir::new().unwrap();
        let browser = RecordingBrowser::default();
        let mut logic = logic_with(&dir, browser.clone());
        logic.handle("edit 1 g/alexyeoh");

        let result = logic.handle("open 1");

        assert!(result.success);
        assert_eq!(
            *browser.opened.borrow(),
            vec!["https://github.com/alexyeoh".to_string()]
        );
    }

    #[test]
    fn browser_failure_only_in_feedback() {
        let dir = TempDir::new().unwrap();
        let browser = RecordingBrowser {
            fail: true,
            ..Default::default()
        };
        let mut logic = logic_with(&dir, browser);
        logic.handle("edit 2 g/berniceyu r/tp");

        let result = logic.handle("open 2");

        assert!(result.success);
        assert!(result.feedback.contains("Could not open https://github.com/berniceyu/tp"));
        assert_eq!(
            logic.model().records()[1].github,
            Github::new("berniceyu").unwrap()
        );
    }

    #[test]
    fn open_without_link_fails() {
        let dir = TempDir::new().unwrap();
        let browser = RecordingBrowser::default();
        let mut logic = logic_with(&dir, browser.clone());

        let result = logic.handle("open 3");

        assert!(!result.success);
        assert!(browser.opened.borrow().is_empty());
    }

    #[test]
    fn clear_two_phase() {
        let dir = TempDir::new().unwrap();
        let mut logic = logic(&dir);

        assert_eq!(logic.handle("clear").feedback, "Clear all 3 students? [Y/N]");
        logic.handle("yes");

        assert!(logic.model().records().is_empty());
        assert!(saved(&dir).records.is_empty());
    }
}
