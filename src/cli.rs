//! CLI interface for TAHub.
//!
//! Two ways in:
//!
//! - `tahub` starts the interactive loop: read a line, run it, print the feedback, repeat
//!   until `exit` or end of input.
//! - `tahub <command words>...` runs one command and exits. If it asks for
//!   confirmation the answer is read from stdin.
//!
//! After any command that can change the listed students, the numbered filtered
//! view is printed again; those numbers are what `delete`, `edit`, `view` and
//! `open` take.
//!
//! Data is loaded once at startup and saved after every successful command. A data
//! file that exists but cannot be loaded stops startup, so it is never overwritten.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::browser::SystemBrowser;
use crate::command::CommandResult;
use crate::config::Config;
use crate::logic::Logic;
use crate::model::Model;
use crate::sample;
use crate::storage::{Storage, StorageError};

/// TAHub: keep track of the students you teach.
#[derive(Debug, Parser)]
#[command(name = "tahub", version, after_long_help = COMMAND_HELP)]
pub struct Cli {
    /// Config file (default: `~/.tahub/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data file; overrides `data-file` from the config.
    #[arg(long)]
    data: Option<PathBuf>,

    /// A command to run once instead of starting the interactive loop.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

const COMMAND_HELP: &str = r#"Examples:
  tahub add n/Alex Yeoh s/A0000001B c/T01 g/alexyeoh t/friends
  tahub find alex c/T01
  tahub delete 2            (asks for y/n on stdin)
  tahub                     (interactive; type `help` for every command)"#;

const WELCOME: &str = "Welcome to TAHub! Type `help` to see every command.";

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let data_file = cli
        .data
        .or_else(|| config.data_file())
        .ok_or("Could not determine home directory; pass --data")?;
    let storage = Storage::new(data_file);
    let model = load_model(&storage)?;

    let mut logic = Logic::new(model, config.defaults, storage, Box::new(SystemBrowser));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if cli.command.is_empty() {
        interactive(&mut logic, stdin.lock(), &mut stdout).map_err(|e| e.to_string())
    } else {
        one_shot(&mut logic, &cli.command.join(" "), stdin.lock(), &mut stdout)
    }
}

/// The stored book, or the sample book on first run.
///
/// An unreadable or invalid file is an error: starting empty would overwrite it on the next save.
fn load_model(storage: &Storage) -> Result<Model, String> {
    let path = storage.path().display();
    let unusable = |e: StorageError| {
        format!("Could not load {path}: {e}\nFix or move the file, then start TAHub again.")
    };
    match storage.load() {
        Ok(Some(snapshot)) => snapshot.into_model().map_err(unusable),
        Ok(None) => {
            tracing::info!(%path, "no data file, starting with sample students");
            let records = sample::records().map_err(|e| format!("bad sample data: {e}"))?;
            Model::new(records, Vec::new()).map_err(|e| format!("bad sample data: {e}"))
        }
        Err(e) => Err(unusable(e)),
    }
}

/// Read–run–print until `exit` or end of input.
fn interactive(logic: &mut Logic, input: impl BufRead, output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "{WELCOME}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            if logic.is_awaiting_confirmation() {
                let cancelled = logic.cancel();
                render(logic, &cancelled, output)?;
            }
            return Ok(());
        };

        let result = logic.handle(&line);
        render(logic, &result, output)?;
        if result.exit {
            return Ok(());
        }
    }
}

/// Runs one command, answering any prompt from `input`.
///
/// End of input while a prompt is open cancels it.
fn one_shot(
    logic: &mut Logic,
    line: &str,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<(), String> {
    let mut answers = input.lines();
    let mut result = logic.handle(line);

    while result.requires_confirmation {
        write!(output, "{} ", result.feedback).map_err(|e| e.to_string())?;
        output.flush().map_err(|e| e.to_string())?;
        result = match answers.next().transpose().map_err(|e| e.to_string())? {
            Some(answer) => logic.handle(&answer),
            None => {
                writeln!(output).map_err(|e| e.to_string())?;
                logic.cancel()
            }
        };
    }

    if result.success {
        render(logic, &result, output).map_err(|e| e.to_string())
    } else {
        Err(result.feedback)
    }
}

/// Prints the feedback, then the numbered filtered view if the command may have changed it.
fn render(logic: &Logic, result: &CommandResult, output: &mut impl Write) -> io::Result<()> {
    writeln!(output, "{}", result.feedback)?;
    if !result.show_list {
        return Ok(());
    }
    let model = logic.model();
    if model.filtered_len() == 0 {
        writeln!(output, "  (no students listed)")?;
    }
    for (i, record) in model.filtered_records().enumerate() {
        writeln!(output, "  {}. {record}", i + 1)?;
    }
    Ok(())
}
