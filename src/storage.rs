//! Local persistence for the student book.
//!
//! Everything lives in one pretty-printed JSON file:
//!
//! ```text
//! {
//!   "records": [ { "name": ..., "studentId": ..., ... } ],
//!   "events":  [ { "name": ..., "time": "2024-10-20T14:00:00" } ]
//! }
//! ```
//!
//! Field types deserialize through their validators, so a hand-edited file
//! with an invalid value fails to load instead of producing a bad record.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::model::{Model, ModelError, Record, TimedEvent};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data file holds duplicates: {0}")]
    Duplicate(#[from] ModelError),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// The persisted state: the full record sequence and the event book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<Record>,

    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

impl Snapshot {
    /// Captures the model's full sequence, ignoring the current filter.
    pub fn of(model: &Model) -> Self {
        Self {
            records: model.records().to_vec(),
            events: model.events().events().to_vec(),
        }
    }

    /// Rebuilds a model, enforcing both uniqueness rules.
    pub fn into_model(self) -> Result<Model> {
        Ok(Model::new(self.records, self.events)?)
    }
}

/// File-based storage for a single snapshot.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot. `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no data file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot: Snapshot = serde_json::from_str(&json)?;
        tracing::debug!(
            path = %self.path.display(),
            records = snapshot.records.len(),
            events = snapshot.events.len(),
            "loaded snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Writes the snapshot, creating the parent directory if needed.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "saved snapshot");
        Ok(())
    }
}
