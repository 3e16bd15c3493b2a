//! Line format of the roster file.
//!
//! One record per line, `name, score1, score2, ...`. A record without scores
//! is written as `name, ` and the reader accepts an empty trailing field, a
//! missing one, or the display placeholder `N/A` for "no scores".

use thiserror::Error;
use tracing::warn;

use crate::model::ScoreRecord;
use crate::model::record::join_scores;
use crate::storage::StoredRecord;

pub const NO_SCORES_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("record name is blank")]
    BlankName,
    #[error("invalid score token {0:?}")]
    InvalidScore(String),
}

/// Parses a single non-blank line.
pub fn parse_line(line: &str) -> Result<StoredRecord, FormatError> {
    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().unwrap_or_default();
    if name.is_empty() {
        return Err(FormatError::BlankName);
    }

    let tokens = fields.filter(|t| !t.is_empty()).collect::<Vec<_>>();
    if let [only] = tokens.as_slice() {
        if only.eq_ignore_ascii_case(NO_SCORES_PLACEHOLDER) {
            return Ok(StoredRecord::new(name, Vec::new()));
        }
    }

    let mut scores = Vec::with_capacity(tokens.len());
    for token in tokens {
        let value = token
            .parse::<i64>()
            .map_err(|_| FormatError::InvalidScore(token.to_string()))?;
        scores.push(value);
    }
    Ok(StoredRecord::new(name, scores))
}

/// Parses a whole file body, skipping blank lines and lines without a name.
/// The first malformed score aborts the parse and is reported with its
/// 1-based line number.
pub fn parse_roster(text: &str) -> Result<Vec<StoredRecord>, (usize, FormatError)> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(FormatError::BlankName) => {
                warn!(line = idx + 1, "skipping stored line without a name");
            }
            Err(err) => return Err((idx + 1, err)),
        }
    }
    Ok(records)
}

pub fn format_record(record: &ScoreRecord) -> String {
    format!("{}, {}", record.name(), join_scores(record.scores()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/storage/format.rs"]
mod tests;
