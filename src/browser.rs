//! Opening links in the user's browser.
//!
//! Best effort: a failure here is reported to the user and never touches
//! the student book.

use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

/// Why a link could not be opened.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("refusing to open {0:?}: not an http(s) URL")]
    InvalidUrl(String),

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exited {
        program: &'static str,
        status: std::process::ExitStatus,
    },
}

/// Something that can show a URL to the user.
pub trait Browser {
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        if !is_web_url(url) {
            return Err(BrowserError::InvalidUrl(url.to_string()));
        }

        let (program, args) = opener(url);
        tracing::debug!(program, url, "opening link");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| BrowserError::Launch { program, source })?;

        if status.success() {
            Ok(())
        } else {
            Err(BrowserError::Exited { program, status })
        }
    }
}

/// The command that hands `url` to the desktop.
fn opener(url: &str) -> (&'static str, Vec<&str>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        // `start` treats its first quoted argument as a window title.
        ("cmd", vec!["/C", "start", "", url])
    } else {
        ("xdg-open", vec![url])
    }
}

/// Only absolute http(s) URLs without whitespace reach the shell.
fn is_web_url(url: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"))
        .is_match(url)
}
