use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::model::ScoreRecord;

pub mod file;
pub mod format;

pub use file::FileRosterStorage;
pub use format::FormatError;

/// A record as it exists on disk: no identity, raw score values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub name: String,
    pub scores: Vec<i64>,
}

impl StoredRecord {
    pub fn new(name: impl Into<String>, scores: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            scores,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {path} at line {line}: {source}")]
    Format {
        path: PathBuf,
        line: usize,
        #[source]
        source: FormatError,
    },
}

/// Persistence backend for the roster.
pub trait RosterStorage: Send + Sync {
    /// Reads every stored record. A missing backing file is an empty roster.
    fn read(&self) -> Result<Vec<StoredRecord>, StorageError>;

    /// Replaces the stored roster with `records`.
    fn write(&self, records: &[ScoreRecord]) -> Result<(), StorageError>;

    fn location(&self) -> String;

    /// Lossy load: any read or parse failure yields an empty roster so the
    /// caller can reseed. Nothing from a partially parsed file is kept.
    fn load(&self) -> Vec<StoredRecord> {
        match self.read() {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    location = %self.location(),
                    error = %err,
                    "failed to load roster, falling back to an empty roster"
                );
                Vec::new()
            }
        }
    }
}
