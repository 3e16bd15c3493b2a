use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::model::ScoreRecord;
use crate::storage::format::{format_record, parse_roster};
use crate::storage::{RosterStorage, StorageError, StoredRecord};

/// Roster kept in a single flat text file.
///
/// Writes go to a sibling `*.tmp` file which is synced and renamed over the
/// target, so readers only ever see a fully written roster.
#[derive(Debug, Clone)]
pub struct FileRosterStorage {
    path: PathBuf,
}

impl FileRosterStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_temp(&self, tmp: &Path, records: &[ScoreRecord]) -> Result<(), StorageError> {
        let file = File::create(tmp).map_err(|e| self.io_error(tmp, e))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{}", format_record(record)).map_err(|e| self.io_error(tmp, e))?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| self.io_error(tmp, e.into_error()))?;
        file.sync_all().map_err(|e| self.io_error(tmp, e))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl RosterStorage for FileRosterStorage {
    fn read(&self) -> Result<Vec<StoredRecord>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "roster file not found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(&self.path, err)),
        };

        parse_roster(&text).map_err(|(line, source)| StorageError::Format {
            path: self.path.clone(),
            line,
            source,
        })
    }

    fn write(&self, records: &[ScoreRecord]) -> Result<(), StorageError> {
        let tmp = self.temp_path();
        let result = self
            .write_temp(&tmp, records)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(|e| self.io_error(&self.path, e)));
        if result.is_err() && tmp.exists() {
            if let Err(err) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %err, "failed to remove temp roster file");
            }
        }
        result?;
        debug!(path = %self.path.display(), records = records.len(), "roster written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/storage/file.rs"]
mod tests;
