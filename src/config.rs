//! TAHub configuration.
//!
//! Loaded from `~/.tahub/config.toml` (or `--config`). A missing file means
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{ClassNumber, Github, ProjectTeam, Repository};
use crate::parser;

/// TAHub configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Where the student snapshot lives. Defaults to `~/.tahub/data.json`.
    pub data_file: Option<PathBuf>,

    /// Literals used for optional fields the user leaves out.
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default literals for optional prefixes.
///
/// Injected into the command parsers: an omitted prefix is parsed from its
/// literal here, so a bad literal is caught by [`Defaults::validate`] at startup
/// rather than on the first `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Defaults {
    pub class: String,
    pub github: String,
    pub project_team: String,
    pub repository: String,
    pub progress: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            class: ClassNumber::UNASSIGNED.to_string(),
            github: Github::NONE.to_string(),
            project_team: ProjectTeam::NONE.to_string(),
            repository: Repository::NONE.to_string(),
            progress: "0".to_string(),
        }
    }
}

impl Defaults {
    /// Checks every literal against its field parser.
    pub fn validate(&self) -> Result<(), String> {
        parser::parse_class(&self.class).map_err(|e| format!("defaults.class: {e}"))?;
        parser::parse_github(&self.github).map_err(|e| format!("defaults.github: {e}"))?;
        parser::parse_project_team(&self.project_team)
            .map_err(|e| format!("defaults.project-team: {e}"))?;
        parser::parse_repository(&self.repository)
            .map_err(|e| format!("defaults.repository: {e}"))?;
        parser::parse_progress(&self.progress).map_err(|e| format!("defaults.progress: {e}"))?;
        Ok(())
    }
}

impl Config {
    /// Load config from `path`, or from `~/.tahub/config.toml` when `None`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config
            .defaults
            .validate()
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        Ok(config)
    }

    /// The config file path: `~/.tahub/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tahub").join("config.toml"))
    }

    /// The snapshot path: `data-file` if set, else `~/.tahub/data.json`.
    pub fn data_file(&self) -> Option<PathBuf> {
        self.data_file
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".tahub").join("data.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn builtin_defaults_are_valid() {
        Defaults::default().validate().unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.defaults, Defaults::default());
        assert!(config.data_file.is_none());
    }

    #[test]
    fn partial_defaults_table_fills_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data-file = \"/tmp/students.json\"\n\n[defaults]\nclass = \"T01\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.defaults.class, "T01");
        assert_eq!(config.defaults.github, Github::NONE);
        assert_eq!(
            config.data_file(),
            Some(PathBuf::from("/tmp/students.json"))
        );
    }

    #[test]
    fn invalid_default_literal_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nprogress = \"150\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.contains("defaults.progress"), "{err}");
    }

    #[test]
    fn unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
